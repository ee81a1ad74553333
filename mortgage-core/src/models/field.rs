use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when resolving a field by name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The name does not match any calculator input.
    #[error("unknown calculator field '{0}'")]
    Unknown(String),
}

/// An input field of the mortgage calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    HomePrice,
    DownPaymentAmount,
    DownPaymentPercent,
    AnnualInterestRatePercent,
    LoanTermYears,
    AnnualPropertyTax,
    AnnualHomeInsurance,
    MonthlyPmi,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::HomePrice,
        Field::DownPaymentAmount,
        Field::DownPaymentPercent,
        Field::AnnualInterestRatePercent,
        Field::LoanTermYears,
        Field::AnnualPropertyTax,
        Field::AnnualHomeInsurance,
        Field::MonthlyPmi,
    ];

    /// The camelCase name used by UI callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HomePrice => "homePrice",
            Self::DownPaymentAmount => "downPaymentAmount",
            Self::DownPaymentPercent => "downPaymentPercent",
            Self::AnnualInterestRatePercent => "annualInterestRatePercent",
            Self::LoanTermYears => "loanTermYears",
            Self::AnnualPropertyTax => "annualPropertyTax",
            Self::AnnualHomeInsurance => "annualHomeInsurance",
            Self::MonthlyPmi => "monthlyPMI",
        }
    }

    /// The snake_case name used in config and CSV files.
    pub fn snake_name(&self) -> &'static str {
        match self {
            Self::HomePrice => "home_price",
            Self::DownPaymentAmount => "down_payment_amount",
            Self::DownPaymentPercent => "down_payment_percent",
            Self::AnnualInterestRatePercent => "annual_interest_rate_percent",
            Self::LoanTermYears => "loan_term_years",
            Self::AnnualPropertyTax => "annual_property_tax",
            Self::AnnualHomeInsurance => "annual_home_insurance",
            Self::MonthlyPmi => "monthly_pmi",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    /// Accepts either the camelCase or the snake_case name. The PMI field
    /// is matched case-insensitively on its acronym (`monthlyPMI`,
    /// `monthlyPmi`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| {
                field.as_str().eq_ignore_ascii_case(name) || field.snake_name() == name
            })
            .ok_or_else(|| FieldError::Unknown(s.to_string()))
    }
}

/// Which member of the down payment pair was written most recently.
///
/// The authoritative member is kept as entered; the other one is derived
/// from it whenever the home price or the member itself changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DownPaymentAuthority {
    Amount,
    #[default]
    Percent,
}

/// A calculator placement, each exposing its own subset of input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculatorVariant {
    /// The full-page calculator; every input is editable.
    #[default]
    Full,

    /// The condensed listing sidebar widget. Taxes, insurance and PMI come
    /// from the seeded defaults and the PMI estimate.
    Sidebar,
}

impl CalculatorVariant {
    /// Input fields the variant lets the caller edit.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Full => &Field::ALL,
            Self::Sidebar => &[
                Field::HomePrice,
                Field::DownPaymentAmount,
                Field::DownPaymentPercent,
                Field::AnnualInterestRatePercent,
                Field::LoanTermYears,
            ],
        }
    }

    pub fn accepts(
        &self,
        field: Field,
    ) -> bool {
        self.fields().contains(&field)
    }
}

impl FromStr for CalculatorVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "sidebar" => Ok(Self::Sidebar),
            other => Err(format!("unknown calculator variant '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_parses_camel_case_names() {
        assert_eq!("homePrice".parse(), Ok(Field::HomePrice));
        assert_eq!("downPaymentPercent".parse(), Ok(Field::DownPaymentPercent));
        assert_eq!("monthlyPMI".parse(), Ok(Field::MonthlyPmi));
        assert_eq!("monthlyPmi".parse(), Ok(Field::MonthlyPmi));
    }

    #[test]
    fn field_parses_snake_case_names() {
        assert_eq!("loan_term_years".parse(), Ok(Field::LoanTermYears));
        assert_eq!(" annual_home_insurance ".parse(), Ok(Field::AnnualHomeInsurance));
    }

    #[test]
    fn field_rejects_unknown_names() {
        assert_eq!(
            "listingId".parse::<Field>(),
            Err(FieldError::Unknown("listingId".to_string()))
        );
    }

    #[test]
    fn field_display_round_trips_through_parse() {
        for field in Field::ALL {
            assert_eq!(field.to_string().parse(), Ok(field));
        }
    }

    #[test]
    fn sidebar_excludes_tax_insurance_and_pmi() {
        let sidebar = CalculatorVariant::Sidebar;

        assert!(sidebar.accepts(Field::HomePrice));
        assert!(sidebar.accepts(Field::DownPaymentPercent));
        assert!(!sidebar.accepts(Field::AnnualPropertyTax));
        assert!(!sidebar.accepts(Field::AnnualHomeInsurance));
        assert!(!sidebar.accepts(Field::MonthlyPmi));
    }

    #[test]
    fn full_accepts_every_field() {
        assert!(Field::ALL.into_iter().all(|f| CalculatorVariant::Full.accepts(f)));
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Sidebar".parse(), Ok(CalculatorVariant::Sidebar));
        assert!("modal".parse::<CalculatorVariant>().is_err());
    }
}
