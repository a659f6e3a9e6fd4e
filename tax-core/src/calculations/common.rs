//! Common numeric helpers shared by the calculators and the renderers.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::TaxCalculationError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a value to exactly two decimal places, midpoints away from zero.
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
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to at most two decimal places for display.
///
/// Rounds like [`round_half_up`] and then drops trailing zeros, so
/// `2550.000` becomes `2550`. Works for every `Decimal`, including the
/// extremes of its range.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_to_two;
///
/// assert_eq!(round_to_two(dec!(11264.8499)), dec!(11264.85));
/// assert_eq!(round_to_two(dec!(1.005)), dec!(1.01));
/// assert_eq!(round_to_two(dec!(-1.005)), dec!(-1.01));
/// assert_eq!(round_to_two(dec!(2550.000)), dec!(2550));
/// ```
pub fn round_to_two(value: Decimal) -> Decimal {
    round_half_up(value).normalize()
}

/// Expresses `part` as a percentage of `whole`.
///
/// # Errors
///
/// - [`TaxCalculationError::InvalidIncome`] when `whole` is zero or negative,
///   since every percentage in a comparison is taken against income
/// - [`TaxCalculationError::Overflow`] when the percentage exceeds the
///   decimal range
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Result<Decimal, TaxCalculationError> {
    if whole <= Decimal::ZERO {
        return Err(TaxCalculationError::InvalidIncome(whole));
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or(TaxCalculationError::Overflow(whole))
}
