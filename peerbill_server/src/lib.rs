//! # Peerbill gateway server
//! The user-facing side of the Peerbill P2P escrow gateway. It runs three listeners over one set of flows:
//!
//! * a gRPC service, `pb.PeerbillUser`, with `GenerateWallet`, `GetRates`, `MadePayment` and `UpdateOrder`;
//! * a JSON gateway that mirrors the gRPC methods under `/v1/*`, plus `/health`;
//! * WebSocket feeds for rates (`/ws/get-rates`) and traders (`/ws/get-traders`).
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
pub mod cli;
pub mod config;
pub mod errors;
pub mod flows;
pub mod grpc;
pub mod routes;
pub mod server;
pub mod ws;

#[cfg(test)]
mod endpoint_tests;
