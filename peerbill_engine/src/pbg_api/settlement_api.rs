//! Releasing escrowed crypto to the buyer once a P2P order is paid for, or expiring it once its window has closed.
use std::{fmt::Debug, str::FromStr, sync::Arc};

use chrono::{DateTime, Utc};
use log::*;
use pbg_common::{parse_units, BaseUnits};

use crate::{
    assets::SupportedAssets,
    db_types::{Order, OrderStatusUpdate, OrderType, TransferInstruction, TxHash},
    pbg_api::{
        errors::ApiError,
        request_objects::MadePaymentRequest,
        transfer_plan::{plan_transfer, ConfirmationPolicy, SettlementOptions},
    },
    traits::{ChainClient, OrderDirectory, WalletStore},
};

/// What a settlement attempt should do, given the order's state and the escrow balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementDecision {
    /// The buyer hasn't confirmed receipt and the payment window is still open.
    NotYetEligible,
    /// The window has closed without the escrow ever being funded.
    Expire,
    /// Eligible, but the escrow holds less than the order amount.
    Insufficient,
    Release,
}

/// The decision table for a settlement attempt. A missing deadline never passes.
pub fn decide_settlement(
    order: &Order,
    now: DateTime<Utc>,
    balance: BaseUnits,
    required: BaseUnits,
) -> SettlementDecision {
    let deadline_passed = order.deadline_passed(now);
    if !order.is_received && !deadline_passed {
        return SettlementDecision::NotYetEligible;
    }
    match (balance >= required, deadline_passed) {
        (true, _) => SettlementDecision::Release,
        (false, true) => SettlementDecision::Expire,
        (false, false) => SettlementDecision::Insufficient,
    }
}

/// `SettlementApi` drives the MadePayment flow.
///
/// Settlement is not idempotent. Two concurrent calls for the same order can both observe a funded escrow and both
/// submit transfers; the second will normally fail on chain for lack of funds, but callers must not retry a request
/// that failed after the transfer stage without first checking the order's status.
pub struct SettlementApi<D, W, C> {
    directory: D,
    wallets: W,
    chain: C,
    assets: SupportedAssets,
    options: SettlementOptions,
}

impl<D, W, C> Debug for SettlementApi<D, W, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SettlementApi ({:?})", self.options.confirmation)
    }
}

impl<D, W, C> SettlementApi<D, W, C>
where
    D: OrderDirectory,
    W: WalletStore,
    C: ChainClient,
{
    pub fn new(directory: D, wallets: W, chain: C, assets: SupportedAssets, options: SettlementOptions) -> Self {
        Self { directory, wallets, chain, assets, options }
    }

    /// Settles (or expires) the order named in `request` and returns the trader service's confirmation message.
    pub async fn made_payment(&self, request: MadePaymentRequest) -> Result<String, ApiError> {
        request.validate()?;
        let order_type =
            OrderType::from_str(&request.order_type).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
        let order = self
            .directory
            .fetch_order(request.id, order_type)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Order {} ({order_type}) does not exist", request.id)))?;
        if !order.escrow_address.eq_ignore_ascii_case(&request.escrow_address) {
            warn!(
                "💸️ Order {} names escrow {} but the request gave {}. Using the order's escrow.",
                order.id, order.escrow_address, request.escrow_address
            );
        }
        let wallet = self
            .wallets
            .fetch_wallet(&order.escrow_address)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("No wallet found for escrow address {}", order.escrow_address)))?;
        let asset = self.assets.get(&order.crypto).ok_or_else(|| ApiError::UnsupportedAsset(order.crypto.clone()))?;

        let balance_text = self.chain.balance_of(asset, &wallet.address).await?;
        let balance = parse_units(&balance_text, asset.decimals)
            .map_err(|e| ApiError::InvalidArgument(format!("Could not parse escrow balance '{balance_text}'. {e}")))?;
        let required = BaseUnits::from_decimal(order.crypto_amount, asset.decimals).map_err(|e| {
            let amount = order.crypto_amount;
            ApiError::InvalidArgument(format!("Order amount {amount} is not valid for {}. {e}", asset.symbol))
        })?;
        debug!("💸️ Order {} escrow {} holds {balance} of {required} base units", order.id, wallet.address);

        match decide_settlement(&order, Utc::now(), balance, required) {
            SettlementDecision::NotYetEligible => Err(ApiError::Precondition(format!(
                "Order {} has not been marked as received and its payment window is still open",
                order.id
            ))),
            SettlementDecision::Expire => {
                info!("💸️ Order {} expired with an underfunded escrow. Marking it as expired.", order.id);
                let message = self.directory.update_order_status(&OrderStatusUpdate::expired(&order)).await?;
                Ok(message)
            },
            SettlementDecision::Insufficient => Err(ApiError::InsufficientBalance {
                balance: format!("{balance_text} {}", asset.symbol),
                required: format!("{} {}", order.crypto_amount, asset.symbol),
            }),
            SettlementDecision::Release => {
                let plan = plan_transfer(asset, &wallet, &request.user_address, required, &self.assets, &self.options)?;
                self.execute_plan(&plan).await?;
                info!(
                    "💸️ Order {} settled: {} {} sent to {}",
                    order.id, order.crypto_amount, asset.symbol, request.user_address
                );
                let message = self.directory.update_order_status(&OrderStatusUpdate::completed(&order)).await?;
                Ok(message)
            },
        }
    }

    async fn execute_plan(&self, plan: &[TransferInstruction]) -> Result<Vec<TxHash>, ApiError> {
        let mut hashes = Vec::with_capacity(plan.len());
        for (i, leg) in plan.iter().enumerate() {
            let tx = self
                .chain
                .transfer(leg)
                .await
                .map_err(|e| ApiError::Transfer(format!("{} {} to {}: {e}", leg.amount, leg.symbol, leg.destination)))?;
            debug!("💸️ Transfer leg {}/{} submitted: {tx}", i + 1, plan.len());
            if i + 1 < plan.len() {
                self.wait_for(&leg.network, &tx).await?;
            }
            hashes.push(tx);
        }
        Ok(hashes)
    }

    async fn wait_for(&self, network: &str, tx: &TxHash) -> Result<(), ApiError> {
        match self.options.confirmation {
            ConfirmationPolicy::AwaitReceipt { timeout } => {
                trace!("💸️ Waiting up to {timeout:?} for {tx} to be mined");
                self.chain
                    .await_confirmation(network, tx, timeout)
                    .await
                    .map_err(|e| ApiError::Transfer(format!("Funding transfer did not confirm. {e}")))
            },
            ConfirmationPolicy::FixedDelay(delay) => {
                trace!("💸️ Waiting {delay:?} for {tx} to settle");
                tokio::time::sleep(delay).await;
                Ok(())
            },
        }
    }
}

impl<D, W, C> SettlementApi<D, W, C>
where
    D: OrderDirectory + 'static,
    W: WalletStore + 'static,
    C: ChainClient + 'static,
{
    /// Runs [`SettlementApi::made_payment`] on its own task. The settlement carries on to completion even if the
    /// caller's future is dropped, so a submitted transfer is always followed by the order status update.
    pub async fn made_payment_detached(self: Arc<Self>, request: MadePaymentRequest) -> Result<String, ApiError> {
        let id = request.id;
        tokio::spawn(async move { self.made_payment(request).await })
            .await
            .map_err(|e| ApiError::Internal(format!("Settlement of order {id} was aborted. {e}")))?
    }
}
