//! Exact conversion between decimal amounts and an asset's smallest indivisible unit.
//!
//! Chain balances and order amounts are compared in base units (wei for an 18-decimal coin, for example). All
//! conversions are done on the decimal text with integer arithmetic, so `1.5` at 18 decimals is exactly
//! `1_500_000_000_000_000_000` and never `1_499_999_999_999_999_872`.
use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 10^38 is the largest power of ten that fits in a `u128`.
pub const MAX_DECIMALS: u8 = 38;

//--------------------------------------     BaseUnits       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseUnits(u128);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("The amount is empty")]
    Empty,
    #[error("'{0}' is not a valid unsigned decimal amount")]
    Malformed(String),
    #[error("Negative amounts are not allowed: {0}")]
    Negative(String),
    #[error("'{amount}' has more than {decimals} fractional digits")]
    TooPrecise { amount: String, decimals: u8 },
    #[error("'{0}' is too large to represent in base units")]
    Overflow(String),
    #[error("{0} decimals is more than the supported maximum of {MAX_DECIMALS}")]
    UnsupportedDecimals(u8),
}

impl BaseUnits {
    pub const ZERO: BaseUnits = BaseUnits(0);

    pub fn value(&self) -> u128 {
        self.0
    }

    /// Converts an exact decimal amount (as carried on orders) into base units.
    pub fn from_decimal(amount: Decimal, decimals: u8) -> Result<Self, UnitsError> {
        if amount.is_zero() {
            return scale_factor(decimals).map(|_| Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(UnitsError::Negative(amount.to_string()));
        }
        parse_units(&amount.normalize().to_string(), decimals)
    }
}

impl From<u128> for BaseUnits {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for BaseUnits {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl FromStr for BaseUnits {
    type Err = UnitsError;

    /// Parses a raw base-unit integer, e.g. `"1500000000000000000"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(UnitsError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UnitsError::Malformed(s.to_string()));
        }
        s.parse::<u128>().map(Self).map_err(|_| UnitsError::Overflow(s.to_string()))
    }
}

impl Display for BaseUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn scale_factor(decimals: u8) -> Result<u128, UnitsError> {
    10u128.checked_pow(u32::from(decimals)).ok_or(UnitsError::UnsupportedDecimals(decimals))
}

/// Parses an unsigned decimal string such as `"0.5"` or `"1200"` into base units for an asset with `decimals`
/// places of precision.
///
/// Anything that would need rounding is an error: a value with more significant fractional digits than `decimals`
/// returns [`UnitsError::TooPrecise`]. Trailing fractional zeros are not significant, so `"1.500"` is accepted at two
/// decimals.
pub fn parse_units(amount: &str, decimals: u8) -> Result<BaseUnits, UnitsError> {
    let scale = scale_factor(decimals)?;
    let text = amount.trim();
    if text.is_empty() {
        return Err(UnitsError::Empty);
    }
    if text.starts_with('-') {
        return Err(UnitsError::Negative(text.to_string()));
    }
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        return Err(UnitsError::Malformed(text.to_string()));
    }
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > usize::from(decimals) {
        return Err(UnitsError::TooPrecise { amount: text.to_string(), decimals });
    }
    let overflow = || UnitsError::Overflow(text.to_string());
    let whole = whole.parse::<u128>().map_err(|_| overflow())?;
    let fraction = if fraction.is_empty() {
        0
    } else {
        // At most `decimals` digits, so both the parse and the padding multiplier fit in a u128
        #[allow(clippy::cast_possible_truncation)]
        let padding = 10u128.pow(u32::from(decimals) - fraction.len() as u32);
        fraction.parse::<u128>().map_err(|_| overflow())? * padding
    };
    whole.checked_mul(scale).and_then(|v| v.checked_add(fraction)).map(BaseUnits).ok_or_else(overflow)
}

/// Renders base units as the canonical decimal string: no trailing fractional zeros and at least one integer digit.
///
/// `parse_units(&format_units(v, d)?, d) == Ok(v)` for every value and supported precision.
pub fn format_units(value: BaseUnits, decimals: u8) -> Result<String, UnitsError> {
    let scale = scale_factor(decimals)?;
    let whole = value.0 / scale;
    let fraction = value.0 % scale;
    if fraction == 0 {
        return Ok(whole.to_string());
    }
    let fraction = format!("{fraction:0width$}", width = usize::from(decimals));
    Ok(format!("{whole}.{}", fraction.trim_end_matches('0')))
}
