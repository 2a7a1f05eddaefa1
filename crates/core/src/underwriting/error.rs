//! Error types for quote derivation.

use thiserror::Error;

/// Errors raised while deriving a quote.
///
/// All variants are local-recoverable: the caller may retry after fixing
/// the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnderwritingError {
    /// The property has no expense schedule recorded yet.
    #[error("No expense schedule recorded for this property yet")]
    MissingExpenses,

    /// The property has no cap rate recorded yet.
    #[error("No cap rate recorded for this property yet")]
    MissingCapRate,

    /// Cap rate is zero, so the property value is undefined.
    #[error("Cap rate is zero, property value is undefined")]
    ZeroCapRate,

    /// Debt rate is zero, so the annuity discounting is undefined.
    #[error("Debt rate is zero, loan sizing is undefined")]
    ZeroDebtRate,

    /// DSCR target is zero, so the debt payment is undefined.
    #[error("DSCR target is zero, debt payment is undefined")]
    ZeroDscrTarget,
}

impl UnderwritingError {
    /// Returns true if the error means a required input record is absent
    /// (as opposed to present but unusable).
    #[must_use]
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingExpenses | Self::MissingCapRate)
    }
}
