//! `SqliteDatabase` is the escrow wallet store used by the gateway.
use std::fmt::Debug;

use async_trait::async_trait;
use log::*;
use sqlx::SqlitePool;

use super::db::{new_pool, run_migrations, wallets};
use crate::{
    db_types::{NewWallet, Wallet},
    traits::{WalletStore, WalletStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

#[async_trait]
impl WalletStore for SqliteDatabase {
    async fn fetch_wallet(&self, address: &str) -> Result<Option<Wallet>, WalletStoreError> {
        let mut conn = self.pool.acquire().await?;
        wallets::fetch_wallet(address, &mut conn).await
    }

    async fn insert_wallet(&self, wallet: NewWallet) -> Result<Wallet, WalletStoreError> {
        let mut conn = self.pool.acquire().await?;
        wallets::insert_wallet(wallet, &mut conn).await
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Brings the schema up to date from the migration directory at `source`.
    pub async fn migrate(&self, source: &str) -> Result<(), sqlx::Error> {
        run_migrations(source, &self.pool).await
    }

    pub async fn wallet_count(&self) -> Result<i64, WalletStoreError> {
        let mut conn = self.pool.acquire().await?;
        wallets::count_wallets(&mut conn).await
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
