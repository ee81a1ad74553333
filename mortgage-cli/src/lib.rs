pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod render;

pub use config::{ConfigError, FieldAssignment};
pub use csv_loader::{CsvLoadError, Scenario};
pub use render::OutputFormat;
