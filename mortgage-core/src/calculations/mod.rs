//! Mortgage payment calculations.
//!
//! This module provides the pure calculation logic behind the calculator:
//! the amortization engine that turns a resolved input set into a payment
//! breakdown, and the PMI deriver that estimates mortgage insurance when the
//! loan-to-value ratio is too high.

pub mod amortization;
pub mod common;
pub mod pmi;

pub use amortization::{MortgageInputs, PaymentBreakdown, compute};
pub use pmi::{PmiConfig, PmiMode};
