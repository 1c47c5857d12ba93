//! SQLite backend for the escrow wallet store.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
