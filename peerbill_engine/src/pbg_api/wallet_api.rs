use std::fmt::Debug;

use log::*;

use crate::{
    db_types::NewWallet,
    pbg_api::errors::ApiError,
    traits::{ChainClient, WalletStore},
    validation::{validate_symbol, FieldViolations},
};

/// Issues escrow wallets.
pub struct WalletApi<W, C> {
    wallets: W,
    chain: C,
}

impl<W, C> Debug for WalletApi<W, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletApi")
    }
}

impl<W, C> WalletApi<W, C>
where
    W: WalletStore,
    C: ChainClient,
{
    pub fn new(wallets: W, chain: C) -> Self {
        Self { wallets, chain }
    }

    /// Generates a key pair, stores it against `crypto` and returns the new address. Nothing is persisted if key
    /// generation fails.
    pub async fn generate_wallet(&self, crypto: &str) -> Result<String, ApiError> {
        let mut violations = FieldViolations::new();
        violations.check("crypto", validate_symbol(crypto));
        violations.into_result()?;
        let keys = self.chain.generate_keypair()?;
        let wallet = self.wallets.insert_wallet(NewWallet::from_keys(keys, crypto)).await?;
        info!("👛️ New {crypto} escrow wallet {}", wallet.address);
        Ok(wallet.address)
    }
}
