//! Peerbill Engine
//!
//! The engine holds the business logic of the Peerbill gateway, independent of how requests arrive (gRPC, JSON or
//! WebSocket) and of how the external systems are reached.
//!
//! The library is divided into these sections:
//! 1. Collaborator contracts ([`mod@traits`]). The trader service, the wallet store, the blockchains and the price
//!    feed are all accessed through traits. Concrete HTTP and chain clients live in `peerbill_clients`; the SQLite
//!    wallet store lives here ([`SqliteDatabase`]).
//! 2. The flows ([`SettlementApi`], [`WalletApi`], [`RateQuoteApi`], [`OrderUpdateApi`], [`TraderFeedApi`]). Each
//!    validates its request, calls its collaborators and reports failures as an [`ApiError`] whose
//!    [`StatusKind`] the transport layers translate.
//! 3. Supporting types: the data types exchanged with collaborators ([`mod@db_types`]), the supported asset registry
//!    ([`mod@assets`]) and field validation ([`mod@validation`]).
pub mod assets;
pub mod db_types;
mod pbg_api;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;
pub mod validation;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use pbg_api::{
    errors::{ApiError, StatusKind},
    order_update_api::OrderUpdateApi,
    rate_quote_api::RateQuoteApi,
    request_objects,
    settlement_api::{decide_settlement, SettlementApi, SettlementDecision},
    trader_feed_api::TraderFeedApi,
    transfer_plan::{
        plan_transfer,
        ConfirmationPolicy,
        SettlementOptions,
        DEFAULT_CONFIRMATION_TIMEOUT,
        DEFAULT_SETTLE_DELAY,
    },
    wallet_api::WalletApi,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
