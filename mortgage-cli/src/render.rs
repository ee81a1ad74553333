//! Text and JSON rendering of calculator results.

use std::fmt::Write;

use serde::Serialize;

use mortgage_core::Snapshot;
use mortgage_core::format::{format_currency, format_percent};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable lines with rounded currency.
    #[default]
    Text,
    /// Unrounded values as JSON.
    Json,
}

#[derive(Serialize)]
struct BatchRow<'a> {
    label: &'a str,
    #[serde(flatten)]
    snapshot: &'a Snapshot,
}

/// Renders a single snapshot.
pub fn render_snapshot(
    snapshot: &Snapshot,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(snapshot.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(snapshot),
    }
}

/// Renders labelled snapshots, one table row or JSON object per scenario.
/// The output always ends with a newline.
pub fn render_batch(
    results: &[(String, Snapshot)],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(batch_table(results)),
        OutputFormat::Json => {
            let rows: Vec<BatchRow<'_>> = results
                .iter()
                .map(|(label, snapshot)| BatchRow { label, snapshot })
                .collect();
            serde_json::to_string_pretty(&rows).map(|json| json + "\n")
        }
    }
}

const HEADERS: [&str; 8] = [
    "Scenario",
    "Price",
    "Down",
    "Loan",
    "P&I",
    "PMI",
    "Monthly",
    "Interest",
];

fn batch_table(results: &[(String, Snapshot)]) -> String {
    let label_width = results
        .iter()
        .map(|(label, _)| label.chars().count())
        .chain(std::iter::once(HEADERS[0].len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = write!(out, "{:<label_width$}", HEADERS[0]);
    for header in &HEADERS[1..] {
        let _ = write!(out, "  {header:>12}");
    }
    out.push('\n');

    for (label, s) in results {
        let down = format!(
            "{} ({}%)",
            format_currency(s.down_payment_amount),
            format_percent(s.down_payment_percent)
        );
        let _ = write!(out, "{label:<label_width$}");
        for cell in [
            format_currency(s.home_price),
            down,
            format_currency(s.loan_amount),
            format_currency(s.monthly_principal_and_interest),
            format_currency(s.monthly_pmi),
            format_currency(s.total_monthly_payment),
            format_currency(s.total_interest_paid),
        ] {
            let _ = write!(out, "  {cell:>12}");
        }
        out.push('\n');
    }
    out
}
