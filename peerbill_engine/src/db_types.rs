use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use pbg_common::{BaseUnits, Secret};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(pub String);

//--------------------------------------     OrderType       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
        }
    }
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            s => Err(ConversionError(format!("Invalid order type: {s}"))),
        }
    }
}

//--------------------------------------       Order         ---------------------------------------------------------
/// A P2P trade order as held by the trader service.
///
/// Amounts are exact decimals. `duration` is the payment deadline: once it has passed, an order that was never funded
/// is expired instead of settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_type: OrderType,
    pub username: String,
    pub escrow_address: String,
    pub crypto: String,
    pub fiat: String,
    #[serde(default)]
    pub fiat_amount: Decimal,
    pub crypto_amount: Decimal,
    #[serde(default)]
    pub rate: Option<Decimal>,
    #[serde(default)]
    pub user_address: Option<String>,
    #[serde(default)]
    pub is_accepted: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_rejected: bool,
    #[serde(default)]
    pub is_received: bool,
    #[serde(default)]
    pub is_expired: bool,
    #[serde(default)]
    pub duration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_holder: Option<String>,
}

impl Order {
    /// An order without a deadline never expires.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.duration.map(|deadline| now > deadline).unwrap_or(false)
    }
}

//--------------------------------------  OrderStatusUpdate   ---------------------------------------------------------
/// The completion flags written back to the trader service at the end of a settlement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub id: i64,
    pub order_type: OrderType,
    pub username: String,
    pub is_completed: bool,
    pub is_expired: bool,
}

impl OrderStatusUpdate {
    pub fn completed(order: &Order) -> Self {
        Self {
            id: order.id,
            order_type: order.order_type,
            username: order.username.clone(),
            is_completed: true,
            is_expired: false,
        }
    }

    pub fn expired(order: &Order) -> Self {
        Self { is_expired: true, ..Self::completed(order) }
    }
}

//--------------------------------------     OrderUpdate     ---------------------------------------------------------
/// Changes to the bank details of an order. `None` fields are left untouched by the trader service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: i64,
    pub username: String,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
}

//--------------------------------------       Trader        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub crypto: String,
    #[serde(default)]
    pub fiat: String,
    #[serde(default)]
    pub buy_rate: Option<Decimal>,
    #[serde(default)]
    pub sell_rate: Option<Decimal>,
    #[serde(default)]
    pub min_amount: Option<Decimal>,
    #[serde(default)]
    pub max_amount: Option<Decimal>,
    #[serde(default)]
    pub is_active: bool,
}

//--------------------------------------       KeyPair       ---------------------------------------------------------
/// A freshly generated secp256k1 key pair. Keys are hex encoded without a `0x` prefix.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub address: String,
    pub public_key: String,
    pub private_key: Secret<String>,
}

//--------------------------------------       Wallet        ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewWallet {
    pub address: String,
    pub public_key: String,
    pub private_key: Secret<String>,
    pub crypto: String,
}

impl NewWallet {
    pub fn from_keys(keys: KeyPair, crypto: &str) -> Self {
        Self {
            address: keys.address,
            public_key: keys.public_key,
            private_key: keys.private_key,
            crypto: crypto.into(),
        }
    }
}

/// An escrow wallet held by the gateway. Addresses are stored lower-cased.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub id: i64,
    pub address: String,
    pub public_key: String,
    pub private_key: Secret<String>,
    pub crypto: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      Transfers      ---------------------------------------------------------
/// A single on-chain transfer. `token_contract` is `None` for the network's native coin.
///
/// `intermediary` is set on the final leg of a two-hop transfer and names the escrow address that was funded with gas
/// by the preceding leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInstruction {
    pub network: String,
    pub symbol: String,
    pub token_contract: Option<String>,
    pub source_key: Secret<String>,
    pub destination: String,
    pub amount: BaseUnits,
    pub intermediary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for TxHash {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}
