//! Calculator defaults from TOML and `FIELD=VALUE` edits from the command
//! line.
//!
//! ## Config format
//!
//! Keys are the snake_case field names; all are optional. Unknown keys are
//! rejected so that typos do not silently fall back to zero.
//!
//! ```toml
//! home_price = 425000
//! down_payment_percent = 10
//! annual_interest_rate_percent = 6.75
//! loan_term_years = 30
//! annual_property_tax = 5100
//! annual_home_insurance = 1400
//!
//! # PMI estimate assumptions
//! pmi_annual_rate = 0.0055
//! pmi_ltv_threshold = 0.8
//! ```

use std::path::{Path, PathBuf};

use mortgage_core::{CalculatorDefaults, Field, FieldError};
use tracing::debug;

/// Errors that can occur while reading configuration or CLI edits.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A `--set` argument without an `=`.
    #[error("expected FIELD=VALUE, got '{0}'")]
    InvalidAssignment(String),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// One `--set FIELD=VALUE` edit. The value is kept as raw text and coerced
/// by the calculator like any other UI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub field: Field,
    pub value: String,
}

/// Parses TOML text into calculator defaults.
pub fn parse_defaults(text: &str) -> Result<CalculatorDefaults, toml::de::Error> {
    toml::from_str(text)
}

/// Reads calculator defaults from a TOML file.
pub fn load_defaults(path: &Path) -> Result<CalculatorDefaults, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let defaults = parse_defaults(&text).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?defaults, "loaded calculator defaults");
    Ok(defaults)
}

/// Parses `FIELD=VALUE`. The value may be empty, which clears the field.
pub fn parse_assignment(s: &str) -> Result<FieldAssignment, ConfigError> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidAssignment(s.to_string()))?;

    Ok(FieldAssignment {
        field: name.parse()?,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_defaults tests
    // =========================================================================

    #[test]
    fn parse_defaults_reads_numbers_and_strings() {
        let defaults = parse_defaults(
            r#"
            home_price = "425000"
            down_payment_percent = "10"
            loan_term_years = 30
            "#,
        )
        .unwrap();

        assert_eq!(defaults.home_price, Some(dec!(425000)));
        assert_eq!(defaults.down_payment_percent, Some(dec!(10)));
        assert_eq!(defaults.loan_term_years, Some(30));
        assert_eq!(defaults.annual_property_tax, None);
    }

    #[test]
    fn parse_defaults_empty_is_all_none() {
        let defaults = parse_defaults("").unwrap();

        assert_eq!(defaults, CalculatorDefaults::default());
    }

    #[test]
    fn parse_defaults_rejects_unknown_keys() {
        let result = parse_defaults("home_prise = \"1\"");

        assert!(result.is_err());
    }

    #[test]
    fn parse_defaults_reads_pmi_overrides() {
        let defaults = parse_defaults("pmi_annual_rate = \"0.0055\"").unwrap();

        assert_eq!(defaults.pmi_config().annual_rate, dec!(0.0055));
        assert_eq!(defaults.pmi_config().ltv_threshold, dec!(0.80));
    }

    // =========================================================================
    // load_defaults tests
    // =========================================================================

    #[test]
    fn load_defaults_missing_file_is_io_error() {
        let result = load_defaults(Path::new("does/not/exist.toml"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    // =========================================================================
    // parse_assignment tests
    // =========================================================================

    #[test]
    fn parse_assignment_splits_on_first_equals() {
        let assignment = parse_assignment("homePrice=450,000").unwrap();

        assert_eq!(
            assignment,
            FieldAssignment {
                field: Field::HomePrice,
                value: "450,000".to_string(),
            }
        );
    }

    #[test]
    fn parse_assignment_allows_empty_value() {
        let assignment = parse_assignment("monthly_pmi=").unwrap();

        assert_eq!(assignment.field, Field::MonthlyPmi);
        assert_eq!(assignment.value, "");
    }

    #[test]
    fn parse_assignment_requires_equals() {
        let result = parse_assignment("homePrice");

        assert!(matches!(result, Err(ConfigError::InvalidAssignment(_))));
    }

    #[test]
    fn parse_assignment_rejects_unknown_field() {
        let result = parse_assignment("bathrooms=2");

        assert!(matches!(result, Err(ConfigError::Field(FieldError::Unknown(_)))));
    }
}
