//! Currency arithmetic helpers
//!
//! Amounts are composed as rust_decimal values and stored as f64.

use rust_decimal::prelude::*;
use shipquote_types::QuoteError;

/// Currency precision (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert a caller-supplied f64 to Decimal, rejecting NaN and infinities
pub(crate) fn to_decimal(value: f64, field: &str) -> Result<Decimal, QuoteError> {
    if !value.is_finite() {
        return Err(QuoteError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        QuoteError::InvalidInput(format!("{} is out of range: {}", field, value))
    })
}

#[inline]
pub(crate) fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage
pub(crate) fn to_f64(value: Decimal) -> Result<f64, QuoteError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QuoteError::InvalidInput(format!("amount not representable: {}", value)))
}

/// Unwrap a checked Decimal operation, reporting overflow as invalid input
pub(crate) fn checked(value: Option<Decimal>, what: &str) -> Result<Decimal, QuoteError> {
    value.ok_or_else(|| QuoteError::InvalidInput(format!("{} overflowed", what)))
}
