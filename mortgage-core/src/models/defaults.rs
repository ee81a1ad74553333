use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::PmiConfig;
use crate::calculations::common::non_negative;

/// Seed values for a new calculator instance.
///
/// Every field is optional; missing inputs start at zero. Typically filled
/// from a listing (price, taxes) and the site's standard assumptions
/// (rate, term).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::CalculatorDefaults;
///
/// let defaults: CalculatorDefaults = toml::from_str(r#"
///     home_price = "350000"
///     down_payment_percent = "20"
///     annual_interest_rate_percent = "6.5"
///     loan_term_years = 30
/// "#).unwrap();
///
/// assert_eq!(defaults.home_price, Some(dec!(350000)));
/// assert_eq!(defaults.loan_term_years, Some(30));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorDefaults {
    pub home_price: Option<Decimal>,
    pub down_payment_amount: Option<Decimal>,
    pub down_payment_percent: Option<Decimal>,
    pub annual_interest_rate_percent: Option<Decimal>,
    pub loan_term_years: Option<u32>,
    pub annual_property_tax: Option<Decimal>,
    pub annual_home_insurance: Option<Decimal>,

    /// A seeded PMI puts the calculator in manual PMI mode.
    pub monthly_pmi: Option<Decimal>,

    /// Overrides the annual PMI premium used for the auto estimate.
    pub pmi_annual_rate: Option<Decimal>,

    /// Overrides the LTV ratio above which PMI is estimated.
    pub pmi_ltv_threshold: Option<Decimal>,
}

impl CalculatorDefaults {
    /// PMI assumptions with any overrides applied.
    ///
    /// The annual rate is clamped to `[0, 1]` and the threshold to `>= 0`.
    pub fn pmi_config(&self) -> PmiConfig {
        let base = PmiConfig::default();
        PmiConfig {
            annual_rate: self
                .pmi_annual_rate
                .map_or(base.annual_rate, |rate| non_negative(rate).min(Decimal::ONE)),
            ltv_threshold: self
                .pmi_ltv_threshold
                .map_or(base.ltv_threshold, non_negative),
        }
    }
}
