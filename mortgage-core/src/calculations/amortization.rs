//! Amortization engine for the monthly mortgage estimate.
//!
//! Turns a fully resolved [`MortgageInputs`] set into a [`PaymentBreakdown`]
//! using the standard fixed-payment formula:
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | Loan amount | `max(home price - down payment, 0)` |
//! | Monthly rate `r` | `annual rate % / 100 / 12` |
//! | Payments `n` | `term years * 12` |
//! | Principal & interest | `L * r * (1+r)^n / ((1+r)^n - 1)`, or `L / n` when `r = 0` |
//! | Monthly tax | `annual property tax / 12` |
//! | Monthly insurance | `annual home insurance / 12` |
//! | Total monthly | `P&I + tax + insurance + PMI` |
//! | Total of payments | `P&I * n` |
//! | Total interest | `P&I * n - L` |
//!
//! Nothing is rounded here. Display rounding is applied by
//! [`crate::format`] so that dependent values never accumulate rounding
//! error.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mortgage_core::calculations::{MortgageInputs, compute};
//! use mortgage_core::calculations::common::round_whole;
//!
//! let inputs = MortgageInputs {
//!     home_price: dec!(400000),
//!     down_payment_amount: dec!(80000),
//!     annual_interest_rate_percent: dec!(6.5),
//!     loan_term_years: 30,
//!     annual_property_tax: dec!(4800),
//!     annual_home_insurance: dec!(1200),
//!     monthly_pmi: dec!(0),
//! };
//!
//! let breakdown = compute(&inputs);
//!
//! assert_eq!(breakdown.loan_amount, dec!(320000));
//! assert_eq!(round_whole(breakdown.monthly_principal_and_interest), dec!(2023));
//! assert_eq!(round_whole(breakdown.total_monthly_payment), dec!(2523));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;

const MONTHS_PER_YEAR: u64 = 12;

/// Resolved input values consumed by the engine.
///
/// Values are expected to be non-negative; the field synchronization layer
/// guarantees this before calling [`compute`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MortgageInputs {
    /// Purchase price of the home.
    pub home_price: Decimal,

    /// Down payment in currency units. May exceed the home price.
    pub down_payment_amount: Decimal,

    /// Annual interest rate as a percentage (6.5 means 6.5%).
    pub annual_interest_rate_percent: Decimal,

    /// Loan term in whole years.
    pub loan_term_years: u32,

    /// Annual property tax.
    pub annual_property_tax: Decimal,

    /// Annual homeowner's insurance premium.
    pub annual_home_insurance: Decimal,

    /// Monthly private mortgage insurance, either user-entered or derived.
    pub monthly_pmi: Decimal,
}

/// Payment estimate produced by [`compute`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    /// Amount financed.
    pub loan_amount: Decimal,

    /// Number of monthly payments over the term.
    pub number_of_payments: u64,

    /// Amortized principal and interest per month.
    pub monthly_principal_and_interest: Decimal,

    /// Property tax per month.
    pub monthly_property_tax: Decimal,

    /// Homeowner's insurance per month.
    pub monthly_insurance: Decimal,

    /// PMI per month, as supplied in the inputs.
    pub monthly_pmi: Decimal,

    /// Sum of every monthly component.
    pub total_monthly_payment: Decimal,

    /// Interest paid over the life of the loan.
    pub total_interest_paid: Decimal,

    /// Principal and interest paid over the life of the loan.
    pub total_of_all_payments: Decimal,
}

/// Computes the payment breakdown for a resolved input set.
///
/// Pure and total: every combination of non-negative inputs yields a valid
/// breakdown. A zero term or a loan amount of zero produce a zero P&I
/// payment, and a zero interest rate falls back to straight-line division.
pub fn compute(inputs: &MortgageInputs) -> PaymentBreakdown {
    let loan_amount = loan_amount(inputs.home_price, inputs.down_payment_amount);
    let monthly_rate = monthly_rate(inputs.annual_interest_rate_percent);
    let number_of_payments = number_of_payments(inputs.loan_term_years);

    let monthly_principal_and_interest =
        monthly_principal_and_interest(loan_amount, monthly_rate, number_of_payments);

    let monthly_property_tax = monthly_share(inputs.annual_property_tax);
    let monthly_insurance = monthly_share(inputs.annual_home_insurance);
    let monthly_pmi = non_negative(inputs.monthly_pmi);

    let total_monthly_payment = monthly_principal_and_interest
        .saturating_add(monthly_property_tax)
        .saturating_add(monthly_insurance)
        .saturating_add(monthly_pmi);

    let total_of_all_payments =
        monthly_principal_and_interest.saturating_mul(Decimal::from(number_of_payments));
    let total_interest_paid = total_interest(total_of_all_payments, loan_amount);

    PaymentBreakdown {
        loan_amount,
        number_of_payments,
        monthly_principal_and_interest,
        monthly_property_tax,
        monthly_insurance,
        monthly_pmi,
        total_monthly_payment,
        total_interest_paid,
        total_of_all_payments,
    }
}

/// Amount financed, clamped at zero when the down payment covers the price.
fn loan_amount(
    home_price: Decimal,
    down_payment_amount: Decimal,
) -> Decimal {
    non_negative(home_price - down_payment_amount)
}

/// Converts an annual percentage rate to a monthly decimal rate.
fn monthly_rate(annual_interest_rate_percent: Decimal) -> Decimal {
    non_negative(annual_interest_rate_percent) / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR)
}

fn number_of_payments(loan_term_years: u32) -> u64 {
    u64::from(loan_term_years) * MONTHS_PER_YEAR
}

/// Level monthly payment that retires `loan_amount` over `number_of_payments`.
///
/// Evaluated as `L * r / (1 - (1+r)^-n)`, which is algebraically identical to
/// the textbook form but never multiplies by the (possibly huge) compounding
/// factor.
fn monthly_principal_and_interest(
    loan_amount: Decimal,
    monthly_rate: Decimal,
    number_of_payments: u64,
) -> Decimal {
    if number_of_payments == 0 || loan_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let straight_line = loan_amount / Decimal::from(number_of_payments);
    if monthly_rate.is_zero() {
        return straight_line;
    }

    let Some(factor) = checked_pow(Decimal::ONE + monthly_rate, number_of_payments) else {
        // (1+r)^n overflowed; the payment has converged to pure interest.
        return loan_amount.saturating_mul(monthly_rate);
    };

    let denominator = Decimal::ONE - Decimal::ONE / factor;
    match (loan_amount.saturating_mul(monthly_rate)).checked_div(denominator) {
        Some(payment) if denominator > Decimal::ZERO => payment,
        // Rate too small to register in the compounding factor.
        _ => straight_line,
    }
}

/// `base^exp` by repeated squaring, or `None` if an intermediate overflows.
fn checked_pow(
    base: Decimal,
    mut exp: u64,
) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

fn monthly_share(annual: Decimal) -> Decimal {
    non_negative(annual) / Decimal::from(MONTHS_PER_YEAR)
}

fn total_interest(
    total_of_all_payments: Decimal,
    loan_amount: Decimal,
) -> Decimal {
    if total_of_all_payments.is_zero() {
        return Decimal::ZERO;
    }
    non_negative(total_of_all_payments - loan_amount)
}
