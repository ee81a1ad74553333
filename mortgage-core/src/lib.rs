pub mod calculations;
pub mod calculator;
pub mod format;
pub mod models;
pub mod parse;

pub use calculations::{PmiConfig, PmiMode};
pub use calculator::MortgageCalculator;
pub use models::*;
pub use parse::RawValue;
