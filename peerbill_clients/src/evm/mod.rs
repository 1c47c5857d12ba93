//! EVM JSON-RPC access for escrow balances, payouts and key generation.
mod chain_client;
mod erc20;
mod keys;

pub use chain_client::EvmChainClient;
pub use keys::{generate_keypair, keypair_from_private_key};
