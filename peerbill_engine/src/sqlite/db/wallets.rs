use chrono::{DateTime, Utc};
use log::debug;
use pbg_common::Secret;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use crate::{
    db_types::{NewWallet, Wallet},
    traits::WalletStoreError,
};

fn wallet_from_row(row: &SqliteRow) -> Result<Wallet, WalletStoreError> {
    let corrupt = |e: sqlx::Error| WalletStoreError::CorruptRecord(e.to_string());
    Ok(Wallet {
        id: row.try_get("id").map_err(corrupt)?,
        address: row.try_get("address").map_err(corrupt)?,
        public_key: row.try_get("public_key").map_err(corrupt)?,
        private_key: Secret::new(row.try_get::<String, _>("private_key").map_err(corrupt)?),
        crypto: row.try_get("crypto").map_err(corrupt)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(corrupt)?,
    })
}

pub async fn fetch_wallet(address: &str, conn: &mut SqliteConnection) -> Result<Option<Wallet>, WalletStoreError> {
    let address = address.to_lowercase();
    let row = sqlx::query("SELECT * FROM wallets WHERE address = $1").bind(address).fetch_optional(conn).await?;
    row.as_ref().map(wallet_from_row).transpose()
}

/// Inserts a new wallet. The address is stored lower-cased so that lookups are case-insensitive.
///
/// The statement is drained with `fetch_all` so that it completes, and the row is visible to the rest of the pool,
/// before this returns.
pub async fn insert_wallet(wallet: NewWallet, conn: &mut SqliteConnection) -> Result<Wallet, WalletStoreError> {
    let address = wallet.address.to_lowercase();
    let rows = sqlx::query(
        r#"INSERT INTO wallets (address, public_key, private_key, crypto) VALUES ($1, $2, $3, $4) RETURNING *"#,
    )
    .bind(&address)
    .bind(&wallet.public_key)
    .bind(wallet.private_key.reveal())
    .bind(&wallet.crypto)
    .fetch_all(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(de) if de.is_unique_violation() => WalletStoreError::AlreadyExists(address.clone()),
        e => WalletStoreError::from(e),
    })?;
    let row = rows.first().ok_or(WalletStoreError::from(sqlx::Error::RowNotFound))?;
    debug!("🗃️ Wallet {address} saved for {}", wallet.crypto);
    wallet_from_row(row)
}

pub async fn count_wallets(conn: &mut SqliteConnection) -> Result<i64, WalletStoreError> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM wallets").fetch_one(conn).await?;
    Ok(count)
}
