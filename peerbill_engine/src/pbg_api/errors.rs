use thiserror::Error;

use crate::{
    traits::{ChainClientError, MarketDataError, OrderDirectoryError, WalletStoreError},
    validation::FieldViolations,
};

/// The transport-neutral outcome category of a failed request. The gRPC, HTTP and WebSocket layers each map this to
/// their own status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    InvalidArgument,
    NotFound,
    FailedPrecondition,
    Internal,
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Invalid request. {0}")]
    Validation(FieldViolations),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Precondition(String),
    #[error("Unsupported cryptocurrency: {0}")]
    UnsupportedAsset(String),
    #[error("Insufficient balance. Escrow holds {balance} but the order requires {required}")]
    InsufficientBalance { balance: String, required: String },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Transfer failed. {0}")]
    Transfer(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> StatusKind {
        match self {
            ApiError::Validation(_) |
            ApiError::UnsupportedAsset(_) |
            ApiError::InsufficientBalance { .. } |
            ApiError::InvalidArgument(_) => StatusKind::InvalidArgument,
            ApiError::NotFound(_) => StatusKind::NotFound,
            ApiError::Precondition(_) => StatusKind::FailedPrecondition,
            ApiError::Transfer(_) | ApiError::Internal(_) => StatusKind::Internal,
        }
    }

    pub fn violations(&self) -> Option<&FieldViolations> {
        match self {
            ApiError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<FieldViolations> for ApiError {
    fn from(v: FieldViolations) -> Self {
        ApiError::Validation(v)
    }
}

impl From<OrderDirectoryError> for ApiError {
    fn from(e: OrderDirectoryError) -> Self {
        ApiError::Internal(format!("Trader service request failed. {e}"))
    }
}

impl From<WalletStoreError> for ApiError {
    fn from(e: WalletStoreError) -> Self {
        ApiError::Internal(format!("Wallet store request failed. {e}"))
    }
}

impl From<ChainClientError> for ApiError {
    fn from(e: ChainClientError) -> Self {
        ApiError::Internal(format!("Blockchain request failed. {e}"))
    }
}

impl From<MarketDataError> for ApiError {
    fn from(e: MarketDataError) -> Self {
        match e {
            MarketDataError::RateNotFound { .. } => ApiError::NotFound(e.to_string()),
            _ => ApiError::Internal(format!("Price feed request failed. {e}")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::validation::validate_id;

    #[test]
    fn status_kinds() {
        let mut v = FieldViolations::new();
        v.check("id", validate_id(0));
        assert_eq!(ApiError::from(v).code(), StatusKind::InvalidArgument);
        assert_eq!(ApiError::UnsupportedAsset("DOGE".into()).code(), StatusKind::InvalidArgument);
        let e = ApiError::InsufficientBalance { balance: "0.1".into(), required: "0.5".into() };
        assert_eq!(e.code(), StatusKind::InvalidArgument);
        assert_eq!(ApiError::NotFound("x".into()).code(), StatusKind::NotFound);
        assert_eq!(ApiError::Precondition("x".into()).code(), StatusKind::FailedPrecondition);
        assert_eq!(ApiError::Transfer("x".into()).code(), StatusKind::Internal);
    }

    #[test]
    fn missing_rate_is_not_found() {
        let e = ApiError::from(MarketDataError::RateNotFound { crypto: "ETH".into(), fiat: "XYZ".into() });
        assert_eq!(e.code(), StatusKind::NotFound);
        let e = ApiError::from(MarketDataError::Unreachable("timeout".into()));
        assert_eq!(e.code(), StatusKind::Internal);
    }
}
