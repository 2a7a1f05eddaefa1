//! Domain types for quote derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::UnderwritingError;

/// Annualizes a unit's monthly rent.
#[must_use]
pub fn annual_unit_rent(monthly_rent: Decimal) -> Decimal {
    monthly_rent * Decimal::from(12)
}

/// A property's annualized operating expenses, by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSchedule {
    /// Marketing costs.
    pub marketing: Decimal,
    /// Property taxes.
    pub taxes: Decimal,
    /// Insurance premiums.
    pub insurance: Decimal,
    /// Repairs and maintenance.
    pub repairs: Decimal,
    /// Administration overhead.
    pub administration: Decimal,
}

impl ExpenseSchedule {
    /// Total annual operating expense across all categories.
    #[must_use]
    pub fn annual_total(&self) -> Decimal {
        self.marketing + self.taxes + self.insurance + self.repairs + self.administration
    }
}

/// The raw inputs to a quote derivation.
///
/// Assembled from the property's persisted records; `assemble` enforces
/// that the expense schedule and cap rate exist before derivation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteInputs {
    /// Annual rent per unit in the rent roll.
    pub unit_annual_rents: Vec<Decimal>,
    /// Total annual operating expense.
    pub annual_expense: Decimal,
    /// Market capitalization rate, percent.
    pub cap_rate: Decimal,
}

impl QuoteInputs {
    /// Assembles derivation inputs from optionally-present records.
    ///
    /// # Errors
    ///
    /// Returns `MissingExpenses` or `MissingCapRate` if the corresponding
    /// record has not been entered for the property yet.
    pub fn assemble(
        unit_annual_rents: Vec<Decimal>,
        annual_expense: Option<Decimal>,
        cap_rate: Option<Decimal>,
    ) -> Result<Self, UnderwritingError> {
        let annual_expense = annual_expense.ok_or(UnderwritingError::MissingExpenses)?;
        let cap_rate = cap_rate.ok_or(UnderwritingError::MissingCapRate)?;
        Ok(Self {
            unit_annual_rents,
            annual_expense,
            cap_rate,
        })
    }
}

/// A fully-derived quote snapshot.
///
/// Currency figures carry 2 decimal places, the debt rate 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFigures {
    /// Total annual rent across the rent roll.
    pub annual_property_rent: Decimal,
    /// Total annual operating expense.
    pub annual_property_expense: Decimal,
    /// All-in debt rate, percent per annum.
    pub debt_rate: Decimal,
    /// Net operating income (may be negative, never clamped).
    pub noi: Decimal,
    /// Annual debt payment supportable at the DSCR target.
    pub annual_debt_payment: Decimal,
    /// Value implied by NOI and the cap rate.
    pub property_value: Decimal,
    /// Loan sized from cash flow via the amortizing annuity.
    pub dscr_loan_amount: Decimal,
    /// Underwritten loan: the lesser of value and DSCR sizing.
    pub loan_amount: Decimal,
}
