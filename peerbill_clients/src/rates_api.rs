//! Spot prices from a CryptoCompare-style `/data/price` endpoint.
use async_trait::async_trait;
use log::*;
use peerbill_engine::traits::{MarketData, MarketDataError};
use reqwest::Method;
use serde_json::Value;

use crate::{config::RatesApiConfig, rest::RestClient, ClientError};

pub const PRICE_PATH: &str = "/data/price";

#[derive(Clone)]
pub struct RatesApi {
    rest: RestClient,
}

impl RatesApi {
    pub fn new(config: RatesApiConfig) -> Result<Self, ClientError> {
        let rest = RestClient::new(&config.base_url, config.timeout)?;
        Ok(Self { rest })
    }
}

/// Pulls the `fiat` price out of a `{"USD": 2650.1, ...}` response. The feed reports unknown symbols as
/// `{"Response": "Error", "Message": ...}`, which is treated as a missing rate.
pub fn extract_rate(response: &Value, crypto: &str, fiat: &str) -> Result<f64, MarketDataError> {
    let not_found = || MarketDataError::RateNotFound { crypto: crypto.to_string(), fiat: fiat.to_string() };
    if let Some(message) = response.get("Message").and_then(Value::as_str) {
        debug!("📈️ Price feed error for {crypto}/{fiat}: {message}");
        return Err(not_found());
    }
    match response.get(fiat) {
        Some(v) => v.as_f64().ok_or_else(|| MarketDataError::Decode(format!("{fiat} price is not a number: {v}"))),
        None => Err(not_found()),
    }
}

#[async_trait]
impl MarketData for RatesApi {
    async fn spot_price(&self, crypto: &str, fiat: &str) -> Result<f64, MarketDataError> {
        let crypto = crypto.to_uppercase();
        let fiat = fiat.to_uppercase();
        let params = [("fsym", crypto.as_str()), ("tsyms", fiat.as_str())];
        let response = self.rest.rest_query::<Value, ()>(Method::GET, PRICE_PATH, &params, None).await?;
        extract_rate(&response, &crypto, &fiat)
    }
}
