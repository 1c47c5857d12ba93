//! Transport-neutral request payloads. The gRPC and JSON layers convert their own message types into these before
//! calling into the flows.
use serde::{Deserialize, Serialize};

use crate::validation::{
    validate_bank_field,
    validate_id,
    validate_order_type,
    validate_symbol,
    validate_username,
    validate_wallet_address,
    FieldViolations,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MadePaymentRequest {
    pub id: i64,
    pub order_type: String,
    pub username: String,
    pub user_address: String,
    pub escrow_address: String,
}

impl MadePaymentRequest {
    pub fn validate(&self) -> Result<(), FieldViolations> {
        let mut violations = FieldViolations::new();
        violations
            .check("id", validate_id(self.id))
            .check("username", validate_username(&self.username))
            .check("order_type", validate_order_type(&self.order_type))
            .check("user_address", validate_wallet_address(&self.user_address))
            .check("escrow_address", validate_wallet_address(&self.escrow_address));
        violations.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    pub id: i64,
    pub username: String,
    pub order_type: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_holder: Option<String>,
}

impl UpdateOrderRequest {
    pub fn validate(&self) -> Result<(), FieldViolations> {
        let mut violations = FieldViolations::new();
        violations
            .check("id", validate_id(self.id))
            .check("username", validate_username(&self.username))
            .check("order_type", validate_order_type(&self.order_type))
            .check_optional("account_holder", self.account_holder.as_deref(), validate_bank_field)
            .check_optional("bank_name", self.bank_name.as_deref(), validate_bank_field)
            .check_optional("account_number", self.account_number.as_deref(), validate_bank_field);
        violations.into_result()
    }
}

/// A currency pair, as used by rate quotes and the trader feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRequest {
    pub crypto: String,
    pub fiat: String,
}

impl PairRequest {
    pub fn new<S: Into<String>>(crypto: S, fiat: S) -> Self {
        Self { crypto: crypto.into(), fiat: fiat.into() }
    }

    pub fn validate(&self) -> Result<(), FieldViolations> {
        let mut violations = FieldViolations::new();
        violations.check("crypto", validate_symbol(&self.crypto)).check("fiat", validate_symbol(&self.fiat));
        violations.into_result()
    }
}
