//! # Collaborator contracts
//!
//! The gateway never owns order state. It talks to four external systems, each behind a trait so that the flows in
//! this crate can be exercised against in-memory fakes:
//!
//! * [`OrderDirectory`] and [`TraderDirectory`] are the trader service, which owns orders and trader listings.
//! * [`WalletStore`] persists the escrow key pairs generated by the gateway.
//! * [`ChainClient`] generates keys, reads balances and submits transfers on the supported chains.
//! * [`MarketData`] supplies spot prices.
//!
//! All of them are `Send + Sync` so that a single instance can be shared by the gRPC, HTTP and WebSocket listeners.
mod chain_client;
mod market_data;
mod order_directory;
mod wallet_store;

pub use chain_client::{ChainClient, ChainClientError};
pub use market_data::{MarketData, MarketDataError};
pub use order_directory::{OrderDirectory, OrderDirectoryError, TraderDirectory};
pub use wallet_store::{WalletStore, WalletStoreError};
