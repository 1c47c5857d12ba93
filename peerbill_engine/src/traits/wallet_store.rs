use async_trait::async_trait;
use thiserror::Error;

use crate::db_types::{NewWallet, Wallet};

#[derive(Debug, Clone, Error)]
pub enum WalletStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("A wallet with address {0} already exists")]
    AlreadyExists(String),
    #[error("Wallet record is corrupt: {0}")]
    CorruptRecord(String),
}

impl From<sqlx::Error> for WalletStoreError {
    fn from(e: sqlx::Error) -> Self {
        WalletStoreError::DatabaseError(e.to_string())
    }
}

/// Persistent storage for escrow wallets.
///
/// Addresses are compared case-insensitively: implementations normalise to lower case on both insert and lookup.
#[async_trait]
pub trait WalletStore: Send + Sync {
    async fn fetch_wallet(&self, address: &str) -> Result<Option<Wallet>, WalletStoreError>;

    /// Stores a new wallet. Inserting an address that is already present is an error
    /// ([`WalletStoreError::AlreadyExists`]) and leaves the existing record untouched.
    async fn insert_wallet(&self, wallet: NewWallet) -> Result<Wallet, WalletStoreError>;
}
