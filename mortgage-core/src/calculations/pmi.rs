//! Private mortgage insurance estimation.
//!
//! Lenders typically require PMI when the loan-to-value ratio exceeds 80%.
//! While the user has not entered a PMI figure the calculator is in
//! [`PmiMode::Auto`] and estimates it as a fixed annual percentage of the
//! loan amount. Once a figure is entered it is kept verbatim in
//! [`PmiMode::Manual`] until the user clears it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mortgage_core::calculations::PmiConfig;
//!
//! let config = PmiConfig::default();
//!
//! // 85% LTV: 255,000 * 0.5% / 12 = 106.25, rounded to 106.
//! assert_eq!(config.derive(dec!(255000), dec!(300000)), dec!(106));
//!
//! // 80% LTV is not above the threshold.
//! assert_eq!(config.derive(dec!(240000), dec!(300000)), dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, round_whole};

/// Whether monthly PMI is estimated by the calculator or entered by the user.
///
/// A manual value of zero is a deliberate user choice and is never
/// overwritten by the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
pub enum PmiMode {
    /// PMI is re-estimated after every change.
    #[default]
    Auto,

    /// PMI is fixed at the user-entered monthly amount.
    Manual(Decimal),
}

impl PmiMode {
    /// True when PMI is estimated rather than entered.
    pub fn is_auto(&self) -> bool {
        matches!(self, PmiMode::Auto)
    }
}

/// Assumptions used to estimate PMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmiConfig {
    /// Annual PMI premium as a fraction of the loan amount.
    ///
    /// Defaults to 0.5% (`0.005`).
    pub annual_rate: Decimal,

    /// Loan-to-value ratio above which PMI applies, as a fraction.
    ///
    /// Defaults to 80% (`0.80`). A ratio exactly at the threshold does not
    /// trigger PMI.
    pub ltv_threshold: Decimal,
}

impl Default for PmiConfig {
    fn default() -> Self {
        Self {
            annual_rate: Decimal::new(5, 3),
            ltv_threshold: Decimal::new(80, 2),
        }
    }
}

impl PmiConfig {
    /// Estimates monthly PMI, rounded to the nearest whole currency unit.
    ///
    /// Returns zero when the home price is zero (LTV undefined) or when the
    /// LTV is at or below the threshold.
    pub fn derive(
        &self,
        loan_amount: Decimal,
        home_price: Decimal,
    ) -> Decimal {
        let Some(ltv) = loan_to_value(loan_amount, home_price) else {
            return Decimal::ZERO;
        };

        if ltv <= self.ltv_threshold {
            return Decimal::ZERO;
        }

        let annual = non_negative(loan_amount).saturating_mul(non_negative(self.annual_rate));
        let pmi = round_whole(annual / Decimal::from(12));
        debug!(%ltv, %pmi, "estimated PMI");
        pmi
    }
}

/// Loan-to-value ratio as a fraction, or `None` when the home price is zero
/// or the ratio does not fit in a `Decimal`.
pub fn loan_to_value(
    loan_amount: Decimal,
    home_price: Decimal,
) -> Option<Decimal> {
    if home_price <= Decimal::ZERO {
        return None;
    }
    non_negative(loan_amount).checked_div(home_price)
}
