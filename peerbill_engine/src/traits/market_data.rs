use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MarketDataError {
    #[error("No {crypto}/{fiat} rate is available")]
    RateNotFound { crypto: String, fiat: String },
    #[error("Could not reach the price feed: {0}")]
    Unreachable(String),
    #[error("Could not decode the price feed response: {0}")]
    Decode(String),
}

/// A spot price feed.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// The price of one unit of `crypto` in `fiat`.
    async fn spot_price(&self, crypto: &str, fiat: &str) -> Result<f64, MarketDataError>;
}
