//! Common utility functions for tax calculations.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into the closed interval `[floor, ceiling]`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::clamp;
///
/// assert_eq!(clamp(dec!(5), dec!(1), dec!(10)), dec!(5));
/// assert_eq!(clamp(dec!(-5), dec!(1), dec!(10)), dec!(1));
/// assert_eq!(clamp(dec!(50), dec!(1), dec!(10)), dec!(10));
/// ```
pub fn clamp(
    value: Decimal,
    floor: Decimal,
    ceiling: Decimal,
) -> Decimal {
    value.max(floor).min(ceiling)
}
