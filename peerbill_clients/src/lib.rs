//! Outbound integrations for the Peerbill gateway.
//!
//! Each client implements one or more of the collaborator traits from `peerbill_engine::traits`:
//!
//! * [`TraderApi`]: `OrderDirectory` and `TraderDirectory`, over the trader service's JSON API.
//! * [`RatesApi`]: `MarketData`, over a CryptoCompare-style price endpoint.
//! * [`EvmChainClient`]: `ChainClient`, over EVM JSON-RPC.
mod config;
mod error;
pub mod evm;
mod rates_api;
mod rest;
mod trader_api;

pub use config::{ChainConfig, RatesApiConfig, TraderApiConfig};
pub use error::ClientError;
pub use evm::EvmChainClient;
pub use rates_api::{extract_rate, RatesApi};
pub use rest::RestClient;
pub use trader_api::TraderApi;
