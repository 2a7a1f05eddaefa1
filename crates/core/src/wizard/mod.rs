//! Routing rules for the linear data-entry workflow.
//!
//! Quote entry walks Address → Expenses → CapRate → Rent roll → Quotes.
//! The sequencer decides, after each step's submission, which step comes
//! next. It holds no state of its own: every decision is a pure function
//! of what records currently exist for the property plus the signal
//! carried in the submission.

pub mod sequencer;
pub mod types;

#[cfg(test)]
mod tests;

pub use sequencer::{
    after_cap_rate_saved, after_expenses_saved, after_property_saved, after_quote_deleted,
    after_unit_deleted, after_unit_saved,
};
pub use types::{UnitRef, UnitSignal, WizardStep};
