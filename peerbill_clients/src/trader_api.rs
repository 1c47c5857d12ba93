//! HTTP client for the trader service, which owns P2P orders and trader listings.
use async_trait::async_trait;
use log::*;
use peerbill_engine::{
    db_types::{Order, OrderStatusUpdate, OrderType, OrderUpdate, Trader},
    traits::{OrderDirectory, OrderDirectoryError, TraderDirectory},
};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{config::TraderApiConfig, rest::RestClient, ClientError};

pub const GET_ORDER_PATH: &str = "/api/get-order";
pub const UPDATE_ORDER_PATH: &str = "/api/update-order";
pub const UPDATE_ORDER_STATUS_PATH: &str = "/api/update-order-status";
pub const GET_TRADERS_PATH: &str = "/api/get-traders";

#[derive(Debug, Clone, Serialize)]
struct OrderQuery {
    id: i64,
    order_type: OrderType,
}

#[derive(Debug, Clone, Serialize)]
struct PairQuery<'a> {
    crypto: &'a str,
    fiat: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TradersResponse {
    #[serde(default)]
    traders: Vec<Trader>,
}

#[derive(Clone)]
pub struct TraderApi {
    rest: RestClient,
}

impl TraderApi {
    pub fn new(config: TraderApiConfig) -> Result<Self, ClientError> {
        let rest = RestClient::new(&config.base_url, config.timeout)?;
        Ok(Self { rest })
    }

    async fn post_for_message<B: Serialize>(&self, path: &str, body: B) -> Result<String, OrderDirectoryError> {
        let response = self.rest.rest_query::<MessageResponse, B>(Method::POST, path, &[], Some(body)).await?;
        Ok(response.message)
    }
}

#[async_trait]
impl OrderDirectory for TraderApi {
    async fn fetch_order(&self, id: i64, order_type: OrderType) -> Result<Option<Order>, OrderDirectoryError> {
        let query = OrderQuery { id, order_type };
        debug!("Fetching order {id} ({order_type})");
        match self.rest.rest_query::<Order, _>(Method::POST, GET_ORDER_PATH, &[], Some(query)).await {
            Ok(order) => Ok(Some(order)),
            Err(ClientError::QueryError { status: 404, .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_order_status(&self, update: &OrderStatusUpdate) -> Result<String, OrderDirectoryError> {
        debug!(
            "Updating order {} ({}): completed={}, expired={}",
            update.id, update.order_type, update.is_completed, update.is_expired
        );
        self.post_for_message(UPDATE_ORDER_STATUS_PATH, update).await
    }

    async fn update_order(&self, update: &OrderUpdate) -> Result<String, OrderDirectoryError> {
        debug!("Updating bank details for order {} ({})", update.id, update.order_type);
        self.post_for_message(UPDATE_ORDER_PATH, update).await
    }
}

#[async_trait]
impl TraderDirectory for TraderApi {
    async fn fetch_traders(&self, crypto: &str, fiat: &str) -> Result<Vec<Trader>, OrderDirectoryError> {
        let query = PairQuery { crypto, fiat };
        let response =
            self.rest.rest_query::<TradersResponse, _>(Method::POST, GET_TRADERS_PATH, &[], Some(query)).await?;
        trace!("{} traders listed for {crypto}/{fiat}", response.traders.len());
        Ok(response.traders)
    }
}
