//! The set of cryptocurrencies the gateway can hold in escrow and settle.
//!
//! The registry is built once at startup and handed to the flows that need it. Lookups are by upper-case symbol.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const ETHEREUM: &str = "ethereum";
pub const BSC: &str = "bsc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    /// The chain's own coin, used to pay gas.
    Native,
    /// An ERC-20 token. Moving it out of escrow needs gas, so settlement first funds the escrow wallet with the
    /// network's native coin when `two_hop` is set.
    Token { contract: String, two_hop: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub network: String,
    pub decimals: u8,
    pub kind: AssetKind,
}

impl Asset {
    pub fn native(symbol: &str, network: &str, decimals: u8) -> Self {
        Self { symbol: symbol.into(), network: network.into(), decimals, kind: AssetKind::Native }
    }

    pub fn token(symbol: &str, network: &str, decimals: u8, contract: &str, two_hop: bool) -> Self {
        let kind = AssetKind::Token { contract: contract.into(), two_hop };
        Self { symbol: symbol.into(), network: network.into(), decimals, kind }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, AssetKind::Native)
    }

    pub fn contract(&self) -> Option<&str> {
        match &self.kind {
            AssetKind::Native => None,
            AssetKind::Token { contract, .. } => Some(contract.as_str()),
        }
    }

    pub fn needs_gas_funding(&self) -> bool {
        matches!(self.kind, AssetKind::Token { two_hop: true, .. })
    }
}

#[derive(Debug, Clone)]
pub struct SupportedAssets {
    assets: HashMap<String, Asset>,
}

impl Default for SupportedAssets {
    /// ETH and BNB natively, plus USDT and USDC on Ethereum mainnet.
    fn default() -> Self {
        Self::new(vec![
            Asset::native("ETH", ETHEREUM, 18),
            Asset::native("BNB", BSC, 18),
            Asset::token("USDT", ETHEREUM, 6, "0xdAC17F958D2ee523a2206206994597C13D831ec7", true),
            Asset::token("USDC", ETHEREUM, 6, "0xA0b86991c6218b36c1d19D4a2E9Eb0cE3606eB48", true),
        ])
    }
}

impl SupportedAssets {
    pub fn new(assets: Vec<Asset>) -> Self {
        let assets = assets.into_iter().map(|a| (a.symbol.to_uppercase(), a)).collect();
        Self { assets }
    }

    pub fn get(&self, symbol: &str) -> Option<&Asset> {
        self.assets.get(&symbol.to_uppercase())
    }

    /// The native coin of `network`, which pays gas for token transfers on that chain.
    pub fn native_for(&self, network: &str) -> Option<&Asset> {
        self.assets.values().find(|a| a.is_native() && a.network == network)
    }

    pub fn networks(&self) -> Vec<&str> {
        let mut networks = self.assets.values().map(|a| a.network.as_str()).collect::<Vec<_>>();
        networks.sort_unstable();
        networks.dedup();
        networks
    }

    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols = self.assets.values().map(|a| a.symbol.as_str()).collect::<Vec<_>>();
        symbols.sort_unstable();
        symbols
    }
}
