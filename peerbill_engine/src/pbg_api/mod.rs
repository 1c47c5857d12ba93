//! # Peerbill gateway flows
//!
//! Each API struct wraps the collaborators it needs and exposes one or two request-level operations. They are generic
//! over the collaborator traits in [`crate::traits`], so the server can plug in HTTP and chain clients while tests
//! plug in mocks.
//!
//! * [`settlement_api::SettlementApi`]: release or expire an escrowed order (MadePayment).
//! * [`wallet_api::WalletApi`]: generate and store escrow wallets.
//! * [`rate_quote_api::RateQuoteApi`]: spot price quotes.
//! * [`order_update_api::OrderUpdateApi`]: bank-detail updates.
//! * [`trader_feed_api::TraderFeedApi`]: trader listings for the WebSocket feed.
pub mod errors;
pub mod order_update_api;
pub mod rate_quote_api;
pub mod request_objects;
pub mod settlement_api;
pub mod trader_feed_api;
pub mod transfer_plan;
pub mod wallet_api;
