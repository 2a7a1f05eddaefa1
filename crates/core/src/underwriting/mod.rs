//! DSCR quote derivation.
//!
//! This module turns a property's raw inputs (per-unit rents, annual
//! operating expenses, market cap rate) into the derived underwriting
//! figures: NOI, property value, and the loan amount sized as the lesser
//! of the value-based and cash-flow-based approaches.

pub mod calculator;
pub mod error;
pub mod policy;
pub mod types;

#[cfg(test)]
mod calculator_props;
#[cfg(test)]
mod tests;

pub use calculator::derive_quote;
pub use error::UnderwritingError;
pub use policy::DebtPolicy;
pub use types::{ExpenseSchedule, QuoteFigures, QuoteInputs, annual_unit_rent};
