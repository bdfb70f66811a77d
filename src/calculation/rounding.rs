//! Rounding shared by every aggregation level.

use rust_decimal::{Decimal, RoundingStrategy};

/// Default number of decimals for hours and amounts.
pub const ROUNDING_PRECISION: u32 = 2;

/// Rounds `value` half away from zero to `dp` decimals.
///
/// # Example
///
/// ```
/// use assmat_engine::calculation::round;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round(Decimal::new(2345, 3), 2), Decimal::new(235, 2));
/// assert_eq!(round(Decimal::new(-2345, 3), 2), Decimal::new(-235, 2));
/// assert_eq!(round(Decimal::new(215, 1), 0), Decimal::from(22));
/// ```
pub fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` to [`ROUNDING_PRECISION`] decimals.
pub fn round2(value: Decimal) -> Decimal {
    round(value, ROUNDING_PRECISION)
}
