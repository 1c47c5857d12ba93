use std::{collections::HashMap, fmt::Debug, str::FromStr, time::Duration};

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    primitives::{Address, B256, U256},
    providers::{Provider, ProviderBuilder},
    rpc::{client::RpcClient, types::TransactionRequest},
};
use async_trait::async_trait;
use log::*;
use pbg_common::{format_units, BaseUnits};
use peerbill_engine::{
    assets::Asset,
    db_types::{KeyPair, TransferInstruction, TxHash},
    traits::{ChainClient, ChainClientError},
};
use url::Url;

use crate::{
    config::ChainConfig,
    evm::{erc20::IERC20, keys},
};

fn rpc_error<E: std::fmt::Display>(e: E) -> ChainClientError {
    ChainClientError::Rpc(e.to_string())
}

fn parse_address(address: &str) -> Result<Address, ChainClientError> {
    Address::from_str(address.trim()).map_err(|_| ChainClientError::InvalidAddress(address.to_string()))
}

/// One JSON-RPC client per network, shared by every request. Signing providers are assembled per transfer from the
/// shared client and the instruction's key.
#[derive(Clone)]
pub struct EvmChainClient {
    clients: HashMap<String, RpcClient>,
    poll_interval: Duration,
}

impl Debug for EvmChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut networks = self.clients.keys().collect::<Vec<_>>();
        networks.sort();
        write!(f, "EvmChainClient ({networks:?})")
    }
}

impl EvmChainClient {
    pub fn new(config: &ChainConfig) -> Result<Self, ChainClientError> {
        let mut clients = HashMap::with_capacity(config.rpc_urls.len());
        for (network, url) in &config.rpc_urls {
            let url =
                Url::parse(url).map_err(|e| ChainClientError::Rpc(format!("Invalid RPC URL for {network}: {e}")))?;
            debug!("⛓️ {network} RPC endpoint is {}", url.host_str().unwrap_or("?"));
            clients.insert(network.clone(), RpcClient::new_http(url));
        }
        Ok(Self { clients, poll_interval: config.receipt_poll_interval })
    }

    fn client_for(&self, network: &str) -> Result<RpcClient, ChainClientError> {
        self.clients.get(network).cloned().ok_or_else(|| ChainClientError::UnknownNetwork(network.to_string()))
    }
}

#[async_trait]
impl ChainClient for EvmChainClient {
    fn generate_keypair(&self) -> Result<KeyPair, ChainClientError> {
        Ok(keys::generate_keypair())
    }

    async fn balance_of(&self, asset: &Asset, address: &str) -> Result<String, ChainClientError> {
        let owner = parse_address(address)?;
        let provider = ProviderBuilder::new().connect_client(self.client_for(&asset.network)?);
        let raw = match asset.contract() {
            None => provider.get_balance(owner).await.map_err(rpc_error)?,
            Some(contract) => {
                let token = IERC20::new(parse_address(contract)?, &provider);
                token.balanceOf(owner).call().await.map_err(rpc_error)?
            },
        };
        let units = u128::try_from(raw).map_err(|_| ChainClientError::Rpc(format!("Balance {raw} is out of range")))?;
        let balance = format_units(BaseUnits::from(units), asset.decimals).map_err(rpc_error)?;
        trace!("⛓️ {address} holds {balance} {}", asset.symbol);
        Ok(balance)
    }

    async fn transfer(&self, instruction: &TransferInstruction) -> Result<TxHash, ChainClientError> {
        let signer = keys::parse_signer(instruction.source_key.reveal())?;
        let from = signer.address();
        let to = parse_address(&instruction.destination)?;
        let amount = U256::from(instruction.amount.value());
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_client(self.client_for(&instruction.network)?);
        let hash = match &instruction.token_contract {
            None => {
                let tx = TransactionRequest::default().with_from(from).with_to(to).with_value(amount);
                let pending = provider.send_transaction(tx).await.map_err(rpc_error)?;
                *pending.tx_hash()
            },
            Some(contract) => {
                let token = IERC20::new(parse_address(contract)?, &provider);
                let pending = token.transfer(to, amount).from(from).send().await.map_err(rpc_error)?;
                *pending.tx_hash()
            },
        };
        info!(
            "⛓️ Sent {} base units of {} from {from} to {to} on {}: {hash}",
            instruction.amount, instruction.symbol, instruction.network
        );
        Ok(TxHash(hash.to_string()))
    }

    async fn await_confirmation(&self, network: &str, tx: &TxHash, timeout: Duration) -> Result<(), ChainClientError> {
        let hash =
            B256::from_str(&tx.0).map_err(|e| ChainClientError::Rpc(format!("Invalid transaction hash {tx}: {e}")))?;
        let provider = ProviderBuilder::new().connect_client(self.client_for(network)?);
        let poll_interval = self.poll_interval;
        let poll = async {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                match provider.get_transaction_receipt(hash).await {
                    Ok(Some(receipt)) => break receipt,
                    Ok(None) => trace!("⛓️ {tx} is not mined yet"),
                    Err(e) => warn!("⛓️ Error fetching the receipt for {tx}: {e}"),
                }
            }
        };
        let receipt =
            tokio::time::timeout(timeout, poll).await.map_err(|_| ChainClientError::ConfirmationTimeout(tx.clone()))?;
        if ReceiptResponse::status(&receipt) {
            debug!("⛓️ {tx} confirmed in block {:?}", receipt.block_number);
            Ok(())
        } else {
            Err(ChainClientError::Reverted(tx.clone()))
        }
    }
}

#[cfg(test)]
mod test {
    use pbg_common::Secret;
    use peerbill_engine::assets::SupportedAssets;

    use super::*;

    fn client() -> EvmChainClient {
        EvmChainClient::new(&ChainConfig::default()).unwrap()
    }

    #[test]
    fn bad_rpc_url_is_rejected() {
        let mut config = ChainConfig::default();
        config.rpc_urls.insert("ethereum".into(), "not a url".into());
        assert!(matches!(EvmChainClient::new(&config), Err(ChainClientError::Rpc(_))));
    }

    #[test]
    fn generates_keys() {
        let keys = client().generate_keypair().unwrap();
        assert_eq!(keys.address.len(), 42);
    }

    #[tokio::test]
    async fn unknown_network_fails_without_io() {
        let asset = Asset::native("MATIC", "polygon", 18);
        let err = client().balance_of(&asset, "0x00000000000000000000000000000000000000aa").await.unwrap_err();
        assert!(matches!(err, ChainClientError::UnknownNetwork(ref n) if n == "polygon"));
    }

    #[tokio::test]
    async fn invalid_owner_address_fails_without_io() {
        let assets = SupportedAssets::default();
        let err = client().balance_of(assets.get("ETH").unwrap(), "0x1234").await.unwrap_err();
        assert!(matches!(err, ChainClientError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn invalid_transfer_inputs_fail_without_io() {
        let mut instruction = TransferInstruction {
            network: "ethereum".into(),
            symbol: "ETH".into(),
            token_contract: None,
            source_key: Secret::new("not-a-key".to_string()),
            destination: "0x00000000000000000000000000000000000000bb".into(),
            amount: BaseUnits::from(1u64),
            intermediary: None,
        };
        let err = client().transfer(&instruction).await.unwrap_err();
        assert!(matches!(err, ChainClientError::InvalidKey(_)));
        instruction.source_key = keys::generate_keypair().private_key;
        instruction.destination = "nowhere".into();
        let err = client().transfer(&instruction).await.unwrap_err();
        assert!(matches!(err, ChainClientError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn malformed_tx_hash_is_rejected() {
        let err = client().await_confirmation("ethereum", &TxHash::from("0x12"), Duration::from_millis(10)).await;
        assert!(matches!(err, Err(ChainClientError::Rpc(_))));
    }
}
