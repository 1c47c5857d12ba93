use std::{fmt::Debug, str::FromStr};

use log::*;

use crate::{
    db_types::{OrderType, OrderUpdate},
    pbg_api::{errors::ApiError, request_objects::UpdateOrderRequest},
    traits::OrderDirectory,
};

/// Forwards bank-detail changes for an order to the trader service.
pub struct OrderUpdateApi<D> {
    directory: D,
}

impl<D> Debug for OrderUpdateApi<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderUpdateApi")
    }
}

impl<D> OrderUpdateApi<D>
where D: OrderDirectory
{
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub async fn update_order(&self, request: UpdateOrderRequest) -> Result<String, ApiError> {
        request.validate()?;
        let order_type =
            OrderType::from_str(&request.order_type).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
        let update = OrderUpdate {
            id: request.id,
            username: request.username,
            order_type,
            bank_name: request.bank_name,
            account_number: request.account_number,
            account_holder: request.account_holder,
        };
        let message = self.directory.update_order(&update).await?;
        debug!("Order {} ({order_type}) updated for {}", update.id, update.username);
        Ok(message)
    }
}
