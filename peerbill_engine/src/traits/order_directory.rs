use async_trait::async_trait;
use thiserror::Error;

use crate::db_types::{Order, OrderStatusUpdate, OrderType, OrderUpdate, Trader};

#[derive(Debug, Clone, Error)]
pub enum OrderDirectoryError {
    #[error("Could not reach the trader service: {0}")]
    Unreachable(String),
    #[error("The trader service returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Could not decode the trader service response: {0}")]
    Decode(String),
}

/// Read and update access to P2P orders held by the trader service.
#[async_trait]
pub trait OrderDirectory: Send + Sync {
    /// Fetches a single order. Returns `Ok(None)` if the trader service has no order with this id and type.
    async fn fetch_order(&self, id: i64, order_type: OrderType) -> Result<Option<Order>, OrderDirectoryError>;

    /// Marks an order as completed (and possibly expired). Returns the service's confirmation message.
    async fn update_order_status(&self, update: &OrderStatusUpdate) -> Result<String, OrderDirectoryError>;

    /// Updates an order's bank details. Returns the service's confirmation message.
    async fn update_order(&self, update: &OrderUpdate) -> Result<String, OrderDirectoryError>;
}

/// Trader listings for a currency pair.
#[async_trait]
pub trait TraderDirectory: Send + Sync {
    async fn fetch_traders(&self, crypto: &str, fiat: &str) -> Result<Vec<Trader>, OrderDirectoryError>;
}
