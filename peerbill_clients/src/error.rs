use peerbill_engine::traits::{MarketDataError, OrderDirectoryError};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Request failed: {0}")]
    RequestError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

impl From<ClientError> for OrderDirectoryError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Initialization(s) | ClientError::RequestError(s) => OrderDirectoryError::Unreachable(s),
            ClientError::JsonError(s) => OrderDirectoryError::Decode(s),
            ClientError::QueryError { status, message } => OrderDirectoryError::Status { status, message },
        }
    }
}

impl From<ClientError> for MarketDataError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::JsonError(s) => MarketDataError::Decode(s),
            e => MarketDataError::Unreachable(e.to_string()),
        }
    }
}
