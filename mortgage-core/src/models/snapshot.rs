use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{MortgageInputs, PaymentBreakdown, PmiMode};
use crate::format::{format_currency, format_percent};
use crate::models::{CalculatorVariant, DownPaymentAuthority};

/// Every input as last resolved and every output as last computed.
///
/// Produced by [`crate::MortgageCalculator::set_field`] and
/// [`crate::MortgageCalculator::snapshot`]. Values are unrounded; use the
/// helpers in [`crate::format`] (or the `Display` impl) for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub variant: CalculatorVariant,

    // Inputs
    pub home_price: Decimal,
    pub down_payment_amount: Decimal,
    pub down_payment_percent: Decimal,
    pub down_payment_authority: DownPaymentAuthority,
    pub annual_interest_rate_percent: Decimal,
    pub loan_term_years: u32,
    pub annual_property_tax: Decimal,
    pub annual_home_insurance: Decimal,
    #[serde(rename = "monthlyPMI")]
    pub monthly_pmi: Decimal,
    pub pmi_mode: PmiMode,

    // Outputs
    pub loan_amount: Decimal,
    /// Loan-to-value as a percentage; `None` while the home price is zero.
    pub loan_to_value_percent: Option<Decimal>,
    pub monthly_principal_and_interest: Decimal,
    pub monthly_property_tax: Decimal,
    pub monthly_insurance: Decimal,
    pub total_monthly_payment: Decimal,
    pub total_interest_paid: Decimal,
    pub total_of_all_payments: Decimal,
}

impl Snapshot {
    pub(crate) fn assemble(
        variant: CalculatorVariant,
        inputs: &MortgageInputs,
        down_payment_percent: Decimal,
        down_payment_authority: DownPaymentAuthority,
        pmi_mode: PmiMode,
        breakdown: &PaymentBreakdown,
    ) -> Self {
        let loan_to_value_percent =
            crate::calculations::pmi::loan_to_value(breakdown.loan_amount, inputs.home_price)
                .map(|ltv| ltv * Decimal::ONE_HUNDRED);

        Self {
            variant,
            home_price: inputs.home_price,
            down_payment_amount: inputs.down_payment_amount,
            down_payment_percent,
            down_payment_authority,
            annual_interest_rate_percent: inputs.annual_interest_rate_percent,
            loan_term_years: inputs.loan_term_years,
            annual_property_tax: inputs.annual_property_tax,
            annual_home_insurance: inputs.annual_home_insurance,
            monthly_pmi: breakdown.monthly_pmi,
            pmi_mode,
            loan_amount: breakdown.loan_amount,
            loan_to_value_percent,
            monthly_principal_and_interest: breakdown.monthly_principal_and_interest,
            monthly_property_tax: breakdown.monthly_property_tax,
            monthly_insurance: breakdown.monthly_insurance,
            total_monthly_payment: breakdown.total_monthly_payment,
            total_interest_paid: breakdown.total_interest_paid,
            total_of_all_payments: breakdown.total_of_all_payments,
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let pmi_source = if self.pmi_mode.is_auto() { "estimated" } else { "entered" };

        writeln!(f, "Home price:              ${}", format_currency(self.home_price))?;
        writeln!(
            f,
            "Down payment:            ${} ({}%)",
            format_currency(self.down_payment_amount),
            format_percent(self.down_payment_percent)
        )?;
        writeln!(f, "Loan amount:             ${}", format_currency(self.loan_amount))?;
        if let Some(ltv) = self.loan_to_value_percent {
            writeln!(f, "Loan-to-value:           {}%", format_percent(ltv))?;
        }
        writeln!(
            f,
            "Interest rate:           {}% over {} years",
            self.annual_interest_rate_percent.normalize(),
            self.loan_term_years
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Principal & interest:    ${}",
            format_currency(self.monthly_principal_and_interest)
        )?;
        writeln!(f, "Property tax:            ${}", format_currency(self.monthly_property_tax))?;
        writeln!(f, "Home insurance:          ${}", format_currency(self.monthly_insurance))?;
        writeln!(
            f,
            "PMI ({pmi_source}):{:width$}${}",
            "",
            format_currency(self.monthly_pmi),
            width = 18 - pmi_source.len()
        )?;
        writeln!(
            f,
            "Total monthly payment:   ${}",
            format_currency(self.total_monthly_payment)
        )?;
        writeln!(f)?;
        writeln!(f, "Total interest paid:     ${}", format_currency(self.total_interest_paid))?;
        write!(f, "Total of all payments:   ${}", format_currency(self.total_of_all_payments))
    }
}
