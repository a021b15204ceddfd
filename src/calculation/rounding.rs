//! The single rounding rule applied to every hour value that leaves the
//! calculator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places hour values are reported with.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// Rounds an hour value to two decimal places, halves rounding up.
///
/// Hour values are never negative by the time they reach this function, so
/// rounding midpoints away from zero is round-half-up.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_hours(Decimal::from_str("7.125").unwrap()), Decimal::from_str("7.13").unwrap());
/// assert_eq!(round_hours(Decimal::from_str("7.124").unwrap()), Decimal::from_str("7.12").unwrap());
/// ```
pub fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
