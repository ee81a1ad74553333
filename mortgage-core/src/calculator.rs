//! Field synchronization for a single calculator instance.
//!
//! [`MortgageCalculator`] owns the mutable input set. Every edit goes
//! through [`MortgageCalculator::set_field`], which resolves dependent
//! fields in a fixed order and then runs the engine:
//!
//! 1. Coerce the raw value and store it.
//! 2. Re-derive the non-authoritative member of the down payment pair.
//! 3. Compute the payment breakdown.
//! 4. In auto PMI mode, re-estimate PMI and, if it changed, compute once more.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mortgage_core::{CalculatorDefaults, CalculatorVariant, Field, MortgageCalculator};
//!
//! let mut calculator = MortgageCalculator::create(
//!     CalculatorVariant::Full,
//!     &CalculatorDefaults {
//!         home_price: Some(dec!(300000)),
//!         annual_interest_rate_percent: Some(dec!(6.5)),
//!         loan_term_years: Some(30),
//!         ..Default::default()
//!     },
//! );
//!
//! let snapshot = calculator.set_field(Field::DownPaymentPercent, "15");
//!
//! assert_eq!(snapshot.down_payment_amount, dec!(45000));
//! assert_eq!(snapshot.loan_amount, dec!(255000));
//! assert_eq!(snapshot.monthly_pmi, dec!(106));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{round_tenth, round_whole};
use crate::calculations::{MortgageInputs, PaymentBreakdown, PmiConfig, PmiMode, compute};
use crate::models::{
    CalculatorDefaults, CalculatorVariant, DownPaymentAuthority, Field, FieldError, Snapshot,
};
use crate::parse::{MAX_INPUT, RawValue, coerce_non_negative, coerce_term_years};

/// A stateful mortgage calculator bound to one UI placement.
///
/// Instances are independent owned values; the full-page calculator and the
/// sidebar widget each hold their own.
#[derive(Debug, Clone)]
pub struct MortgageCalculator {
    variant: CalculatorVariant,
    inputs: MortgageInputs,
    down_payment_percent: Decimal,
    authority: DownPaymentAuthority,
    pmi_mode: PmiMode,
    pmi_config: PmiConfig,
    breakdown: PaymentBreakdown,
}

impl MortgageCalculator {
    /// Creates a calculator seeded with `defaults`.
    ///
    /// Defaults are applied regardless of which fields the variant lets the
    /// caller edit afterwards. When both down payment members are supplied
    /// the percent wins.
    pub fn create(
        variant: CalculatorVariant,
        defaults: &CalculatorDefaults,
    ) -> Self {
        let seed = |value: Option<Decimal>| {
            value
                .map(|v| coerce_non_negative(&RawValue::Decimal(v)))
                .unwrap_or_default()
        };

        let inputs = MortgageInputs {
            home_price: seed(defaults.home_price),
            down_payment_amount: seed(defaults.down_payment_amount),
            annual_interest_rate_percent: seed(defaults.annual_interest_rate_percent),
            loan_term_years: defaults.loan_term_years.unwrap_or_default(),
            annual_property_tax: seed(defaults.annual_property_tax),
            annual_home_insurance: seed(defaults.annual_home_insurance),
            monthly_pmi: seed(defaults.monthly_pmi),
        };

        let authority = match (defaults.down_payment_amount, defaults.down_payment_percent) {
            (Some(_), None) => DownPaymentAuthority::Amount,
            _ => DownPaymentAuthority::Percent,
        };

        let pmi_mode = match defaults.monthly_pmi {
            Some(_) => PmiMode::Manual(inputs.monthly_pmi),
            None => PmiMode::Auto,
        };

        let mut calculator = Self {
            variant,
            inputs,
            down_payment_percent: seed(defaults.down_payment_percent),
            authority,
            pmi_mode,
            pmi_config: defaults.pmi_config(),
            breakdown: PaymentBreakdown::default(),
        };
        calculator.sync_down_payment();
        calculator.recompute();

        debug!(?variant, ?authority, "calculator created");
        calculator
    }

    /// Sets a field from a caller-supplied value and returns the resolved
    /// snapshot.
    ///
    /// Invalid or negative values are stored as zero. Writing blank text to
    /// [`Field::MonthlyPmi`] returns PMI to auto mode; any other value fixes
    /// it manually. Fields outside the variant's declared set are ignored.
    pub fn set_field(
        &mut self,
        field: Field,
        raw: impl Into<RawValue>,
    ) -> Snapshot {
        let raw = raw.into();

        if !self.variant.accepts(field) {
            warn!(%field, variant = ?self.variant, "field not editable in this calculator");
            return self.snapshot();
        }

        match field {
            Field::HomePrice => {
                self.inputs.home_price = coerce_non_negative(&raw);
            }
            Field::DownPaymentAmount => {
                self.inputs.down_payment_amount = coerce_non_negative(&raw);
                self.authority = DownPaymentAuthority::Amount;
            }
            Field::DownPaymentPercent => {
                self.down_payment_percent = coerce_non_negative(&raw);
                self.authority = DownPaymentAuthority::Percent;
            }
            Field::AnnualInterestRatePercent => {
                self.inputs.annual_interest_rate_percent = coerce_non_negative(&raw);
            }
            Field::LoanTermYears => {
                self.inputs.loan_term_years = coerce_term_years(&raw);
            }
            Field::AnnualPropertyTax => {
                self.inputs.annual_property_tax = coerce_non_negative(&raw);
            }
            Field::AnnualHomeInsurance => {
                self.inputs.annual_home_insurance = coerce_non_negative(&raw);
            }
            Field::MonthlyPmi => {
                if raw.is_blank() {
                    self.pmi_mode = PmiMode::Auto;
                } else {
                    let pmi = coerce_non_negative(&raw);
                    self.inputs.monthly_pmi = pmi;
                    self.pmi_mode = PmiMode::Manual(pmi);
                }
            }
        }

        debug!(%field, value = ?raw, "field updated");
        self.sync_down_payment();
        self.recompute();
        self.snapshot()
    }

    /// Sets a field addressed by its camelCase or snake_case name.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Unknown`] when `name` is not a calculator field.
    /// State is left untouched in that case.
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        raw: impl Into<RawValue>,
    ) -> Result<Snapshot, FieldError> {
        let field: Field = name.parse()?;
        Ok(self.set_field(field, raw))
    }

    /// Returns PMI to auto mode without touching any other field.
    pub fn reset_pmi(&mut self) -> Snapshot {
        self.pmi_mode = PmiMode::Auto;
        self.recompute();
        self.snapshot()
    }

    /// The current state, without mutating anything.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::assemble(
            self.variant,
            &self.inputs,
            self.down_payment_percent,
            self.authority,
            self.pmi_mode,
            &self.breakdown,
        )
    }

    /// The placement this calculator was created for.
    pub fn variant(&self) -> CalculatorVariant {
        self.variant
    }

    /// Keeps the down payment pair consistent with the home price, deriving
    /// the non-authoritative member from the authoritative one.
    fn sync_down_payment(&mut self) {
        let home_price = self.inputs.home_price;

        // Derived members saturate at MAX_INPUT.
        match self.authority {
            DownPaymentAuthority::Amount => {
                self.down_payment_percent = if home_price > Decimal::ZERO {
                    self.inputs
                        .down_payment_amount
                        .checked_div(home_price)
                        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                        .map_or(MAX_INPUT, |percent| round_tenth(percent.min(MAX_INPUT)))
                } else {
                    Decimal::ZERO
                };
            }
            DownPaymentAuthority::Percent => {
                self.inputs.down_payment_amount = home_price
                    .checked_mul(self.down_payment_percent)
                    .map_or(MAX_INPUT, |product| {
                        round_whole((product / Decimal::ONE_HUNDRED).min(MAX_INPUT))
                    });
            }
        }
    }

    /// Runs the engine, re-estimating PMI at most once when in auto mode.
    fn recompute(&mut self) {
        if let PmiMode::Manual(pmi) = self.pmi_mode {
            self.inputs.monthly_pmi = pmi;
        }

        let breakdown = compute(&self.inputs);

        self.breakdown = match self.pmi_mode {
            PmiMode::Manual(_) => breakdown,
            PmiMode::Auto => {
                let estimated = self
                    .pmi_config
                    .derive(breakdown.loan_amount, self.inputs.home_price);
                if estimated == self.inputs.monthly_pmi {
                    breakdown
                } else {
                    self.inputs.monthly_pmi = estimated;
                    compute(&self.inputs)
                }
            }
        };
    }
}
