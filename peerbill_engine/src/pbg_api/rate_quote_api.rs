use std::fmt::Debug;

use log::*;

use crate::{
    pbg_api::{errors::ApiError, request_objects::PairRequest},
    traits::MarketData,
};

/// Spot price quotes for a crypto/fiat pair.
pub struct RateQuoteApi<M> {
    market: M,
}

impl<M> Debug for RateQuoteApi<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RateQuoteApi")
    }
}

impl<M> RateQuoteApi<M>
where M: MarketData
{
    pub fn new(market: M) -> Self {
        Self { market }
    }

    pub async fn get_rate(&self, pair: &PairRequest) -> Result<f64, ApiError> {
        pair.validate()?;
        let rate = self.market.spot_price(&pair.crypto, &pair.fiat).await?;
        trace!("📈️ {}/{} = {rate}", pair.crypto, pair.fiat);
        Ok(rate)
    }
}
