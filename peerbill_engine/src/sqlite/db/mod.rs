//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interaction are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool, or create an atomic transaction as
//! the need arises and call through to the functions without any other changes.
use std::{path::PathBuf, str::FromStr};

use log::info;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod wallets;

/// Opens a pool on `url`, creating the database file if it doesn't exist yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}

/// Applies the migrations found at `source`, which is a directory path, optionally with a `file://` scheme.
pub async fn run_migrations(source: &str, pool: &SqlitePool) -> Result<(), SqlxError> {
    let path = PathBuf::from(source.strip_prefix("file://").unwrap_or(source));
    info!("🗃️ Running migrations from {}", path.display());
    let migrator = Migrator::new(path).await?;
    migrator.run(pool).await?;
    Ok(())
}
