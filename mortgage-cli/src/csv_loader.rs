//! CSV loader for batch mortgage scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive.
//!
//! | Column                         | Required | Type    | Notes                          |
//! |--------------------------------|----------|---------|--------------------------------|
//! | `label`                        | yes      | string  | Shown in the batch output      |
//! | `home_price`                   | yes      | decimal | e.g. `350000.00`               |
//! | `down_payment_amount`          | no       | decimal | Mutually exclusive with percent |
//! | `down_payment_percent`         | no       | decimal | e.g. `20` for 20%              |
//! | `annual_interest_rate_percent` | no       | decimal | e.g. `6.5`                     |
//! | `loan_term_years`              | no       | integer | e.g. `30`                      |
//! | `annual_property_tax`          | no       | decimal |                                |
//! | `annual_home_insurance`        | no       | decimal |                                |
//! | `monthly_pmi`                  | no       | decimal | Empty cell means estimate it   |
//!
//! Empty optional cells start at zero, except `monthly_pmi` which is then
//! estimated from the loan-to-value ratio.
//!
//! ### Example
//!
//! ```csv
//! label,home_price,down_payment_percent,annual_interest_rate_percent,loan_term_years
//! starter,300000,15,6.5,30
//! upsize,650000,20,6.25,30
//! ```
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use mortgage_core::{CalculatorDefaults, CalculatorVariant, MortgageCalculator, Snapshot};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    home_price: Decimal,
    #[serde(default)]
    down_payment_amount: Option<Decimal>,
    #[serde(default)]
    down_payment_percent: Option<Decimal>,
    #[serde(default)]
    annual_interest_rate_percent: Option<Decimal>,
    #[serde(default)]
    loan_term_years: Option<u32>,
    #[serde(default)]
    annual_property_tax: Option<Decimal>,
    #[serde(default)]
    annual_home_insurance: Option<Decimal>,
    #[serde(default)]
    monthly_pmi: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading batch scenarios.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row set both `down_payment_amount` and `down_payment_percent`.
    /// `row` is 1-based (header = row 0).
    #[error("row {row} ('{label}') sets both down_payment_amount and down_payment_percent")]
    ConflictingDownPayment { label: String, row: usize },

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One labelled set of calculator inputs from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: String,
    pub defaults: CalculatorDefaults,
}

impl Scenario {
    /// Runs the scenario through a fresh full calculator.
    pub fn evaluate(&self) -> Snapshot {
        MortgageCalculator::create(CalculatorVariant::Full, &self.defaults).snapshot()
    }
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, CsvLoadError> {
    if row.down_payment_amount.is_some() && row.down_payment_percent.is_some() {
        return Err(CsvLoadError::ConflictingDownPayment {
            label: row.label,
            row: row_number,
        });
    }

    Ok(Scenario {
        label: row.label,
        defaults: CalculatorDefaults {
            home_price: Some(row.home_price),
            down_payment_amount: row.down_payment_amount,
            down_payment_percent: row.down_payment_percent,
            annual_interest_rate_percent: row.annual_interest_rate_percent,
            loan_term_years: row.loan_term_years,
            annual_property_tax: row.annual_property_tax,
            annual_home_insurance: row.annual_home_insurance,
            monthly_pmi: row.monthly_pmi,
            ..Default::default()
        },
    })
}

/// Parses CSV text into scenarios, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::ConflictingDownPayment] if a row sets both down
///   payment columns.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Reads a file from disk and delegates to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenarios = load_from_str(&contents)?;
    debug!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
