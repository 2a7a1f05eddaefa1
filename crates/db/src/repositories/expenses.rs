//! Expense schedule repository.
//!
//! Every write refreshes the property's quote in the same transaction.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use quoin_core::underwriting::{DebtPolicy, ExpenseSchedule, UnderwritingError};
use quoin_shared::AppError;

use crate::entities::expenses;

use super::property::lock_property;
use super::quote::{RefreshError, refresh_quote};

/// Error types for expense schedule operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpensesError {
    /// No expense schedule exists for the property.
    #[error("No expense schedule found for property {0}")]
    NotFound(Uuid),

    /// An expense schedule already exists for the property.
    #[error("An expense schedule already exists for property {0}")]
    AlreadyExists(Uuid),

    /// The owning property does not exist.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// An expense amount is negative.
    #[error("Expense amounts cannot be negative")]
    NegativeAmount,

    /// The quote refresh failed; the write was rolled back.
    #[error(transparent)]
    Underwriting(UnderwritingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RefreshError> for ExpensesError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Underwriting(e) => Self::Underwriting(e),
            RefreshError::Database(e) => Self::Database(e),
        }
    }
}

impl From<ExpensesError> for AppError {
    fn from(err: ExpensesError) -> Self {
        match err {
            ExpensesError::NotFound(_) | ExpensesError::PropertyNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ExpensesError::AlreadyExists(_) => Self::Conflict(err.to_string()),
            ExpensesError::NegativeAmount => Self::Validation(err.to_string()),
            ExpensesError::Underwriting(_) => Self::BusinessRule(err.to_string()),
            ExpensesError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating or updating an expense schedule.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseScheduleInput {
    /// Marketing costs, annualized.
    pub marketing: Decimal,
    /// Property taxes, annualized.
    pub taxes: Decimal,
    /// Insurance premiums, annualized.
    pub insurance: Decimal,
    /// Repairs and maintenance, annualized.
    pub repairs: Decimal,
    /// Administration overhead, annualized.
    pub administration: Decimal,
}

impl ExpenseScheduleInput {
    fn validate(&self) -> Result<(), ExpensesError> {
        let amounts = [
            self.marketing,
            self.taxes,
            self.insurance,
            self.repairs,
            self.administration,
        ];
        if amounts.iter().any(Decimal::is_sign_negative) {
            return Err(ExpensesError::NegativeAmount);
        }
        Ok(())
    }

    fn schedule(&self) -> ExpenseSchedule {
        ExpenseSchedule {
            marketing: self.marketing,
            taxes: self.taxes,
            insurance: self.insurance,
            repairs: self.repairs,
            administration: self.administration,
        }
    }
}

/// Expense schedule repository.
#[derive(Debug, Clone)]
pub struct ExpensesRepository {
    db: DatabaseConnection,
    policy: DebtPolicy,
}

impl ExpensesRepository {
    /// Creates a new expenses repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, policy: DebtPolicy) -> Self {
        Self { db, policy }
    }

    /// Creates the property's expense schedule.
    ///
    /// The annual expense total is derived from the five categories, and
    /// the property's quote is refreshed in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the property does not exist, a schedule
    /// already exists, an amount is negative, or the write fails.
    pub async fn create_expenses(
        &self,
        property_id: Uuid,
        input: ExpenseScheduleInput,
    ) -> Result<expenses::Model, ExpensesError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        lock_property(&txn, property_id)
            .await?
            .ok_or(ExpensesError::PropertyNotFound(property_id))?;

        let existing = expenses::Entity::find()
            .filter(expenses::Column::PropertyId.eq(property_id))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(ExpensesError::AlreadyExists(property_id));
        }

        let now = Utc::now().into();
        let schedule = input.schedule();
        let active = expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            property_id: Set(property_id),
            marketing: Set(input.marketing),
            taxes: Set(input.taxes),
            insurance: Set(input.insurance),
            repairs: Set(input.repairs),
            administration: Set(input.administration),
            annual_expense: Set(schedule.annual_total()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = active.insert(&txn).await?;
        refresh_quote(&txn, property_id, &self.policy).await?;
        txn.commit().await?;

        Ok(saved)
    }

    /// Updates the property's expense schedule.
    ///
    /// The annual expense total is recomputed and the property's quote is
    /// refreshed in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no schedule exists for the property, an amount
    /// is negative, or the write fails.
    pub async fn update_expenses(
        &self,
        property_id: Uuid,
        input: ExpenseScheduleInput,
    ) -> Result<expenses::Model, ExpensesError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        lock_property(&txn, property_id)
            .await?
            .ok_or(ExpensesError::PropertyNotFound(property_id))?;

        let current = expenses::Entity::find()
            .filter(expenses::Column::PropertyId.eq(property_id))
            .one(&txn)
            .await?
            .ok_or(ExpensesError::NotFound(property_id))?;

        let schedule = input.schedule();
        let mut active: expenses::ActiveModel = current.into();
        active.marketing = Set(input.marketing);
        active.taxes = Set(input.taxes);
        active.insurance = Set(input.insurance);
        active.repairs = Set(input.repairs);
        active.administration = Set(input.administration);
        active.annual_expense = Set(schedule.annual_total());
        active.updated_at = Set(Utc::now().into());

        let saved = active.update(&txn).await?;
        refresh_quote(&txn, property_id, &self.policy).await?;
        txn.commit().await?;

        Ok(saved)
    }

    /// Gets the property's expense schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if no schedule exists or the query fails.
    pub async fn get_expenses(&self, property_id: Uuid) -> Result<expenses::Model, ExpensesError> {
        expenses::Entity::find()
            .filter(expenses::Column::PropertyId.eq(property_id))
            .one(&self.db)
            .await?
            .ok_or(ExpensesError::NotFound(property_id))
    }
}
