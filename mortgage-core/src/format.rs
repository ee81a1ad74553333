//! Display formatting for calculator values.
//!
//! Rounding to whole currency units happens only here, never inside the
//! engine.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::calculations::common::{round_tenth, round_whole};

/// Formats an amount as whole currency units with comma thousands
/// separators. Negative amounts render as `"0"`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(2022.62)), "2,023");
/// assert_eq!(format_currency(dec!(1234567.5)), "1,234,568");
/// assert_eq!(format_currency(dec!(-10)), "0");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    if amount.is_sign_negative() {
        return "0".to_string();
    }
    group_thousands(&round_whole(amount).trunc().to_string())
}

/// Formats a floating-point amount like [`format_currency`]. `NaN`,
/// infinities and negative values render as `"0"`.
pub fn format_currency_f64(amount: f64) -> String {
    if !amount.is_finite() || amount < 0.0 {
        return "0".to_string();
    }
    Decimal::from_f64(amount)
        .map(format_currency)
        .unwrap_or_else(|| "0".to_string())
}

/// Formats a percentage with exactly one decimal place.
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::format::format_percent;
///
/// assert_eq!(format_percent(dec!(20)), "20.0");
/// assert_eq!(format_percent(dec!(16.666)), "16.7");
/// ```
pub fn format_percent(percent: Decimal) -> String {
    if percent.is_sign_negative() {
        return "0.0".to_string();
    }
    let mut rounded = round_tenth(percent);
    rounded.rescale(1);
    rounded.to_string()
}

/// Inserts a comma between every group of three integer digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_small_values_have_no_separator() {
        assert_eq!(format_currency(dec!(0)), "0");
        assert_eq!(format_currency(dec!(999.49)), "999");
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1000)), "1,000");
        assert_eq!(format_currency(dec!(320000)), "320,000");
        assert_eq!(format_currency(dec!(1000000000)), "1,000,000,000");
    }

    #[test]
    fn format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(106.5)), "107");
        assert_eq!(format_currency(dec!(999.5)), "1,000");
    }

    #[test]
    fn format_currency_drops_trailing_scale() {
        assert_eq!(format_currency(dec!(400.00)), "400");
    }

    #[test]
    fn format_currency_negative_is_zero() {
        assert_eq!(format_currency(dec!(-0.4)), "0");
    }

    // =========================================================================
    // format_currency_f64 tests
    // =========================================================================

    #[test]
    fn format_currency_f64_non_finite_is_zero() {
        assert_eq!(format_currency_f64(f64::NAN), "0");
        assert_eq!(format_currency_f64(f64::INFINITY), "0");
        assert_eq!(format_currency_f64(-5.0), "0");
    }

    #[test]
    fn format_currency_f64_formats_like_decimal() {
        assert_eq!(format_currency_f64(2522.6), "2,523");
    }

    // =========================================================================
    // format_percent tests
    // =========================================================================

    #[test]
    fn format_percent_pads_to_one_decimal() {
        assert_eq!(format_percent(dec!(15)), "15.0");
        assert_eq!(format_percent(dec!(85.04)), "85.0");
    }

    #[test]
    fn format_percent_negative_is_zero() {
        assert_eq!(format_percent(dec!(-1)), "0.0");
    }
}
