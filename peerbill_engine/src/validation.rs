//! Field-level request validation.
//!
//! Each validator checks a single value and returns a human-readable description of what is wrong with it.
//! [`FieldViolations`] collects the failures for a whole request, in field order, so that callers see every problem
//! at once rather than one per round trip.
use std::{fmt::Display, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::db_types::OrderType;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 100;
pub const SYMBOL_MIN_LEN: usize = 3;
pub const SYMBOL_MAX_LEN: usize = 4;
pub const BANK_FIELD_MIN_LEN: usize = 3;
pub const BANK_FIELD_MAX_LEN: usize = 100;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9_]+$").expect("username pattern is a valid regex"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldViolations(Vec<FieldViolation>);

impl FieldViolations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a validator against `field`.
    pub fn check(&mut self, field: &str, result: Result<(), String>) -> &mut Self {
        if let Err(description) = result {
            self.0.push(FieldViolation { field: field.into(), description });
        }
        self
    }

    /// Like [`FieldViolations::check`], but skips fields that were not supplied.
    pub fn check_optional<T, F>(&mut self, field: &str, value: Option<T>, validator: F) -> &mut Self
    where F: FnOnce(T) -> Result<(), String> {
        match value {
            Some(v) => self.check(field, validator(v)),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }

    /// `Ok` if nothing was recorded, otherwise the full set of violations.
    pub fn into_result(self) -> Result<(), FieldViolations> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for FieldViolations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self.0.iter().map(|v| format!("{}: {}", v.field, v.description)).collect::<Vec<_>>();
        write!(f, "{}", parts.join("; "))
    }
}

pub fn validate_string(value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(format!("must contain from {min}-{max} characters"));
    }
    Ok(())
}

pub fn validate_id(id: i64) -> Result<(), String> {
    if id < 1 {
        return Err("must be a positive integer".into());
    }
    Ok(())
}

pub fn validate_username(value: &str) -> Result<(), String> {
    validate_string(value, USERNAME_MIN_LEN, USERNAME_MAX_LEN)?;
    if !username_pattern().is_match(value) {
        return Err("must contain only lowercase letters, digits, or underscore".into());
    }
    Ok(())
}

pub fn validate_order_type(value: &str) -> Result<(), String> {
    value.parse::<OrderType>().map(|_| ()).map_err(|_| "must be either 'buy' or 'sell'".to_string())
}

pub fn validate_symbol(value: &str) -> Result<(), String> {
    validate_string(value, SYMBOL_MIN_LEN, SYMBOL_MAX_LEN)
}

pub fn validate_bank_field(value: &str) -> Result<(), String> {
    validate_string(value, BANK_FIELD_MIN_LEN, BANK_FIELD_MAX_LEN)
}

/// An EVM address: `0x` followed by exactly 40 hex digits. Checksum casing is not enforced.
pub fn validate_wallet_address(value: &str) -> Result<(), String> {
    let hex = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"));
    match hex {
        Some(h) if h.len() == 40 && h.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(()),
        _ => Err("invalid wallet address".into()),
    }
}
