//! Coercion of caller-supplied field values into calculator inputs.
//!
//! The calculator is UI-facing: whatever a text box or slider hands over is
//! accepted, and anything that is not a usable non-negative number becomes
//! zero instead of raising an error.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::{debug, warn};

use crate::calculations::common::non_negative;

/// Largest accepted input magnitude. Keeps every downstream product well
/// inside `Decimal`'s range.
pub const MAX_INPUT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0); // 1e15

const MAX_INPUT_F64: f64 = 1e15;

/// A value as handed over by the caller, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Decimal(Decimal),
}

impl RawValue {
    /// True for text that is empty or whitespace only, i.e. a cleared field.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Decimal(Decimal::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Decimal(Decimal::from(value))
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        RawValue::Decimal(value)
    }
}

/// Normalizes text for decimal parsing: trims whitespace, a leading currency
/// sign, a trailing percent sign and comma thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Converts a float, saturating finite values beyond [`MAX_INPUT`] instead
/// of rejecting them. `NaN` and infinities are `None`.
fn decimal_from_f64(n: f64) -> Option<Decimal> {
    if !n.is_finite() {
        return None;
    }
    if n > MAX_INPUT_F64 {
        return Some(MAX_INPUT);
    }
    if n < -MAX_INPUT_F64 {
        return Some(-MAX_INPUT);
    }
    Decimal::from_f64(n)
}

/// Parses text into a [`Decimal`], accepting plain and scientific notation.
///
/// Numbers outside `Decimal`'s range fall back to a float parse so that
/// they saturate rather than read as invalid.
fn parse_text(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
        .or_else(|| normalized.parse::<f64>().ok().and_then(decimal_from_f64))
}

/// Coerces a raw value to a non-negative decimal no larger than
/// [`MAX_INPUT`].
///
/// Blank text is zero. Unparseable text, `NaN`, infinities and negative
/// numbers are zero. Finite numbers above [`MAX_INPUT`], however large,
/// become [`MAX_INPUT`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::parse::coerce_non_negative;
///
/// assert_eq!(coerce_non_negative(&"$1,234.56".into()), dec!(1234.56));
/// assert_eq!(coerce_non_negative(&"abc".into()), dec!(0));
/// assert_eq!(coerce_non_negative(&(-5.0).into()), dec!(0));
/// assert_eq!(coerce_non_negative(&f64::NAN.into()), dec!(0));
/// ```
pub fn coerce_non_negative(raw: &RawValue) -> Decimal {
    let parsed = match raw {
        RawValue::Text(s) => parse_text(s),
        RawValue::Number(n) => decimal_from_f64(*n),
        RawValue::Decimal(d) => Some(*d),
    };

    let Some(value) = parsed else {
        warn!(input = ?raw, "invalid numeric input, using 0");
        return Decimal::ZERO;
    };

    if value.is_sign_negative() && !value.is_zero() {
        debug!(%value, "negative input clamped to 0");
    }

    let value = non_negative(value);
    if value > MAX_INPUT {
        debug!(%value, "input clamped to maximum");
        return MAX_INPUT;
    }
    value
}

/// Coerces a raw value to a whole number of years, truncating any fraction.
///
/// ```
/// use mortgage_core::parse::coerce_term_years;
///
/// assert_eq!(coerce_term_years(&"30".into()), 30);
/// assert_eq!(coerce_term_years(&15.9.into()), 15);
/// assert_eq!(coerce_term_years(&"".into()), 0);
/// ```
pub fn coerce_term_years(raw: &RawValue) -> u32 {
    coerce_non_negative(raw).trunc().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // coerce_non_negative tests
    // =========================================================================

    #[test]
    fn coerce_accepts_comma_thousands_separator() {
        assert_eq!(coerce_non_negative(&"1,234.56".into()), dec!(1234.56));
        assert_eq!(coerce_non_negative(&"1,234,567.89".into()), dec!(1234567.89));
    }

    #[test]
    fn coerce_strips_currency_and_percent_signs() {
        assert_eq!(coerce_non_negative(&"$400,000".into()), dec!(400000));
        assert_eq!(coerce_non_negative(&"6.5%".into()), dec!(6.5));
    }

    #[test]
    fn coerce_trims_whitespace() {
        assert_eq!(coerce_non_negative(&"  123.45  ".into()), dec!(123.45));
    }

    #[test]
    fn coerce_blank_is_zero() {
        assert_eq!(coerce_non_negative(&"".into()), Decimal::ZERO);
        assert_eq!(coerce_non_negative(&"   ".into()), Decimal::ZERO);
    }

    #[test]
    fn coerce_invalid_text_is_zero() {
        assert_eq!(coerce_non_negative(&"abc".into()), Decimal::ZERO);
        assert_eq!(coerce_non_negative(&"12abc".into()), Decimal::ZERO);
    }

    #[test]
    fn coerce_accepts_scientific_notation() {
        assert_eq!(coerce_non_negative(&"4e5".into()), dec!(400000));
    }

    #[test]
    fn coerce_negative_is_zero() {
        assert_eq!(coerce_non_negative(&"-100".into()), Decimal::ZERO);
        assert_eq!(coerce_non_negative(&(-0.5).into()), Decimal::ZERO);
        assert_eq!(coerce_non_negative(&RawValue::from(-7_i64)), Decimal::ZERO);
    }

    #[test]
    fn coerce_non_finite_is_zero() {
        assert_eq!(coerce_non_negative(&f64::NAN.into()), Decimal::ZERO);
        assert_eq!(coerce_non_negative(&f64::INFINITY.into()), Decimal::ZERO);
    }

    #[test]
    fn coerce_clamps_to_max_input() {
        assert_eq!(MAX_INPUT, dec!(1_000_000_000_000_000));
        assert_eq!(coerce_non_negative(&1e20.into()), MAX_INPUT);
        assert_eq!(coerce_non_negative(&"1e20".into()), MAX_INPUT);
    }

    #[test]
    fn coerce_saturates_numbers_beyond_decimal_range() {
        assert_eq!(coerce_non_negative(&1e300.into()), MAX_INPUT);
        assert_eq!(coerce_non_negative(&f64::MAX.into()), MAX_INPUT);
        assert_eq!(coerce_non_negative(&"1e30".into()), MAX_INPUT);
        assert_eq!(coerce_non_negative(&"123456789012345678901234567890123".into()), MAX_INPUT);
    }

    #[test]
    fn coerce_huge_negative_is_zero() {
        assert_eq!(coerce_non_negative(&(-1e300).into()), Decimal::ZERO);
        assert_eq!(coerce_non_negative(&"-1e30".into()), Decimal::ZERO);
    }

    #[test]
    fn coerce_non_finite_text_is_zero() {
        assert_eq!(coerce_non_negative(&"inf".into()), Decimal::ZERO);
        assert_eq!(coerce_non_negative(&"NaN".into()), Decimal::ZERO);
    }

    #[test]
    fn coerce_accepts_plain_numbers() {
        assert_eq!(coerce_non_negative(&250000.0.into()), dec!(250000));
        assert_eq!(coerce_non_negative(&RawValue::from(30_u32)), dec!(30));
    }

    // =========================================================================
    // coerce_term_years tests
    // =========================================================================

    #[test]
    fn coerce_term_years_truncates_fractions() {
        assert_eq!(coerce_term_years(&"20.7".into()), 20);
    }

    #[test]
    fn coerce_term_years_invalid_is_zero() {
        assert_eq!(coerce_term_years(&"thirty".into()), 0);
        assert_eq!(coerce_term_years(&(-15.0).into()), 0);
    }

    #[test]
    fn is_blank_only_for_empty_text() {
        assert!(RawValue::from("  ").is_blank());
        assert!(!RawValue::from("0").is_blank());
        assert!(!RawValue::from(0.0).is_blank());
    }
}
