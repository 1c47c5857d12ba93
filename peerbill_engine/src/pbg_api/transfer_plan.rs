//! Building the list of on-chain transfers that release an escrowed amount.
use std::time::Duration;

use pbg_common::{BaseUnits, Secret};
use rust_decimal::Decimal;

use crate::{
    assets::{Asset, SupportedAssets},
    db_types::{TransferInstruction, Wallet},
    pbg_api::errors::ApiError,
};

pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(30);

/// How the settlement flow waits for a funding transfer to land before spending from the funded wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPolicy {
    /// Poll the chain for the funding transaction's receipt.
    AwaitReceipt { timeout: Duration },
    /// Sleep for a fixed period. Only for networks whose nodes don't serve receipts promptly.
    FixedDelay(Duration),
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        ConfirmationPolicy::AwaitReceipt { timeout: DEFAULT_CONFIRMATION_TIMEOUT }
    }
}

#[derive(Debug, Clone)]
pub struct SettlementOptions {
    /// Pays for gas when a token has to leave an escrow wallet that holds no native coin.
    pub operator_key: Option<Secret<String>>,
    /// Native coin, in whole units, sent to the escrow wallet ahead of a token transfer.
    pub token_gas_funding: Decimal,
    pub confirmation: ConfirmationPolicy,
}

impl Default for SettlementOptions {
    fn default() -> Self {
        Self { operator_key: None, token_gas_funding: Decimal::new(3, 3), confirmation: ConfirmationPolicy::default() }
    }
}

/// Returns the ordered transfers that move `amount` of `asset` from the escrow `wallet` to `destination`.
///
/// A native coin is a single transfer. A two-hop token first receives gas funding from the operator key, then sends
/// the tokens from the escrow key. No chain access happens here.
pub fn plan_transfer(
    asset: &Asset,
    wallet: &Wallet,
    destination: &str,
    amount: BaseUnits,
    assets: &SupportedAssets,
    options: &SettlementOptions,
) -> Result<Vec<TransferInstruction>, ApiError> {
    let payout = TransferInstruction {
        network: asset.network.clone(),
        symbol: asset.symbol.clone(),
        token_contract: asset.contract().map(String::from),
        source_key: wallet.private_key.clone(),
        destination: destination.to_string(),
        amount,
        intermediary: None,
    };
    if !asset.needs_gas_funding() {
        return Ok(vec![payout]);
    }
    let operator_key = options.operator_key.as_ref().filter(|k| !k.is_empty()).ok_or_else(|| {
        ApiError::Internal(format!("{} transfers need gas funding but no operator key is configured", asset.symbol))
    })?;
    let gas_coin = assets.native_for(&asset.network).ok_or_else(|| {
        ApiError::Internal(format!("No native coin is registered for the {} network", asset.network))
    })?;
    let funding = BaseUnits::from_decimal(options.token_gas_funding, gas_coin.decimals)
        .map_err(|e| ApiError::Internal(format!("Invalid gas funding amount. {e}")))?;
    let funding_leg = TransferInstruction {
        network: gas_coin.network.clone(),
        symbol: gas_coin.symbol.clone(),
        token_contract: None,
        source_key: operator_key.clone(),
        destination: wallet.address.clone(),
        amount: funding,
        intermediary: None,
    };
    let payout = TransferInstruction { intermediary: Some(wallet.address.clone()), ..payout };
    Ok(vec![funding_leg, payout])
}
