//! Common numeric helpers shared by the amortization engine, the PMI deriver
//! and the field synchronization layer.
//!
//! Rounding always uses half-up (away from zero) semantics so that a value of
//! exactly `x.5` lands on the larger whole unit, matching how the calculator
//! displays currency.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(15.45), 1), dec!(15.5));
/// assert_eq!(round_half_up(dec!(15.44), 1), dec!(15.4));
/// assert_eq!(round_half_up(dec!(106.25), 0), dec!(106));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole currency unit.
pub fn round_whole(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// Rounds a percentage to one decimal place.
pub fn round_tenth(value: Decimal) -> Decimal {
    round_half_up(value, 1)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(2023.49), 0);

        assert_eq!(result, dec!(2023));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(2023.5), 0);

        assert_eq!(result, dec!(2024));
    }

    #[test]
    fn round_half_up_respects_decimal_places() {
        let result = round_half_up(dec!(16.666666), 1);

        assert_eq!(result, dec!(16.7));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(dec!(0.00), 0);

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // round_whole / round_tenth tests
    // =========================================================================

    #[test]
    fn round_whole_drops_cents() {
        assert_eq!(round_whole(dec!(106.25)), dec!(106));
        assert_eq!(round_whole(dec!(106.50)), dec!(107));
    }

    #[test]
    fn round_tenth_keeps_one_decimal() {
        assert_eq!(round_tenth(dec!(12.34)), dec!(12.3));
        assert_eq!(round_tenth(dec!(12.35)), dec!(12.4));
    }

    // =========================================================================
    // max / non_negative tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        let result = max(dec!(100.00), dec!(200.00));

        assert_eq!(result, dec!(200.00));
    }

    #[test]
    fn max_handles_equal_values() {
        let result = max(dec!(150.00), dec!(150.00));

        assert_eq!(result, dec!(150.00));
    }

    #[test]
    fn non_negative_clamps_negative_to_zero() {
        assert_eq!(non_negative(dec!(-0.01)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(42)), dec!(42));
    }
}
