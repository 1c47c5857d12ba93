use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    assets::Asset,
    db_types::{KeyPair, TransferInstruction, TxHash},
};

#[derive(Debug, Clone, Error)]
pub enum ChainClientError {
    #[error("No RPC endpoint is configured for network {0}")]
    UnknownNetwork(String),
    #[error("Invalid address {0}")]
    InvalidAddress(String),
    #[error("Invalid private key: {0}")]
    InvalidKey(String),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Transaction {0} failed on chain")]
    Reverted(TxHash),
    #[error("Timed out waiting for transaction {0} to be mined")]
    ConfirmationTimeout(TxHash),
}

/// Blockchain access for the supported EVM networks.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Generates a fresh secp256k1 key pair and derives its address.
    fn generate_keypair(&self) -> Result<KeyPair, ChainClientError>;

    /// The balance of `address` in `asset`, rendered as a decimal string in whole units (e.g. `"0.5"` ETH).
    async fn balance_of(&self, asset: &Asset, address: &str) -> Result<String, ChainClientError>;

    /// Signs and submits a transfer, returning as soon as the node has accepted the transaction.
    async fn transfer(&self, instruction: &TransferInstruction) -> Result<TxHash, ChainClientError>;

    /// Waits until `tx` has a receipt on `network`. A reverted transaction is an error.
    async fn await_confirmation(&self, network: &str, tx: &TxHash, timeout: Duration) -> Result<(), ChainClientError>;
}
