pub mod helpers;
mod secret;
mod units;

pub use secret::Secret;
pub use units::{format_units, parse_units, BaseUnits, UnitsError, MAX_DECIMALS};
