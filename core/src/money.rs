// core/src/money.rs

//! Conversions between decimal display amounts and the integer minor units
//! the processor charges. Both go through the same half-up rounding, so the
//! total shown to the shopper always matches the amount charged.

use crate::error::{CheckoutError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const MINOR_UNITS_PER_MAJOR: Decimal = Decimal::ONE_HUNDRED;

/// Rounds `amount` half-up to two decimal places.
pub fn round_to_cents(amount: Decimal) -> Decimal {
  let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(2);
  rounded
}

/// Converts a decimal total to integer minor units, e.g. `19.995` to `2000`.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
  round_to_cents(amount)
    .checked_mul(MINOR_UNITS_PER_MAJOR)
    .and_then(|cents| cents.to_i64())
    .ok_or_else(|| CheckoutError::Internal(format!("Amount {} does not fit in minor units", amount)))
}

/// Formats an amount the way the order summary shows it, e.g. `$20.00`.
pub fn display_amount(amount: Decimal) -> String {
  format!("${}", round_to_cents(amount))
}
