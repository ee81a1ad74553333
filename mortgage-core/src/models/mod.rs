mod defaults;
mod field;
mod snapshot;

pub use defaults::CalculatorDefaults;
pub use field::{CalculatorVariant, DownPaymentAuthority, Field, FieldError};
pub use snapshot::Snapshot;
