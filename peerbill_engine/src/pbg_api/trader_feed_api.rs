use std::fmt::Debug;

use crate::{
    db_types::Trader,
    pbg_api::{errors::ApiError, request_objects::PairRequest},
    traits::TraderDirectory,
};

/// Trader listings for the live traders feed.
pub struct TraderFeedApi<T> {
    traders: T,
}

impl<T> Debug for TraderFeedApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TraderFeedApi")
    }
}

impl<T> TraderFeedApi<T>
where T: TraderDirectory
{
    pub fn new(traders: T) -> Self {
        Self { traders }
    }

    pub async fn get_traders(&self, pair: &PairRequest) -> Result<Vec<Trader>, ApiError> {
        pair.validate()?;
        let traders = self.traders.fetch_traders(&pair.crypto, &pair.fiat).await?;
        Ok(traders)
    }
}
