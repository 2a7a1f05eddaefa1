//! Cap rate repository.
//!
//! Every write refreshes the property's quote in the same transaction. A
//! zero cap rate makes the derivation fail, which rolls the whole write
//! back and leaves any stored quote unchanged.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use quoin_core::underwriting::{DebtPolicy, UnderwritingError};
use quoin_shared::AppError;

use crate::entities::cap_rates;

use super::property::lock_property;
use super::quote::{RefreshError, refresh_quote};

/// Error types for cap rate operations.
#[derive(Debug, thiserror::Error)]
pub enum CapRateError {
    /// No cap rate exists for the property.
    #[error("No cap rate found for property {0}")]
    NotFound(Uuid),

    /// A cap rate already exists for the property.
    #[error("A cap rate already exists for property {0}")]
    AlreadyExists(Uuid),

    /// The owning property does not exist.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// The quote refresh failed; the write was rolled back.
    #[error(transparent)]
    Underwriting(UnderwritingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RefreshError> for CapRateError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Underwriting(e) => Self::Underwriting(e),
            RefreshError::Database(e) => Self::Database(e),
        }
    }
}

impl From<CapRateError> for AppError {
    fn from(err: CapRateError) -> Self {
        match err {
            CapRateError::NotFound(_) | CapRateError::PropertyNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CapRateError::AlreadyExists(_) => Self::Conflict(err.to_string()),
            CapRateError::Underwriting(_) => Self::BusinessRule(err.to_string()),
            CapRateError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating or updating a cap rate.
#[derive(Debug, Clone, Copy)]
pub struct CapRateInput {
    /// Market capitalization rate, percent (2 decimal places).
    pub cap_rate: Decimal,
}

/// Cap rate repository.
#[derive(Debug, Clone)]
pub struct CapRateRepository {
    db: DatabaseConnection,
    policy: DebtPolicy,
}

impl CapRateRepository {
    /// Creates a new cap rate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, policy: DebtPolicy) -> Self {
        Self { db, policy }
    }

    /// Creates the property's cap rate.
    ///
    /// The property's quote is refreshed in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the property does not exist, a cap rate
    /// already exists, the refresh rejects the value, or the write fails.
    pub async fn create_cap_rate(
        &self,
        property_id: Uuid,
        input: CapRateInput,
    ) -> Result<cap_rates::Model, CapRateError> {
        let txn = self.db.begin().await?;

        lock_property(&txn, property_id)
            .await?
            .ok_or(CapRateError::PropertyNotFound(property_id))?;

        let existing = cap_rates::Entity::find()
            .filter(cap_rates::Column::PropertyId.eq(property_id))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(CapRateError::AlreadyExists(property_id));
        }

        let now = Utc::now().into();
        let active = cap_rates::ActiveModel {
            id: Set(Uuid::now_v7()),
            property_id: Set(property_id),
            cap_rate: Set(input.cap_rate),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = active.insert(&txn).await?;
        refresh_quote(&txn, property_id, &self.policy).await?;
        txn.commit().await?;

        Ok(saved)
    }

    /// Updates the property's cap rate.
    ///
    /// The property's quote is refreshed in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no cap rate exists for the property, the
    /// refresh rejects the value, or the write fails.
    pub async fn update_cap_rate(
        &self,
        property_id: Uuid,
        input: CapRateInput,
    ) -> Result<cap_rates::Model, CapRateError> {
        let txn = self.db.begin().await?;

        lock_property(&txn, property_id)
            .await?
            .ok_or(CapRateError::PropertyNotFound(property_id))?;

        let current = cap_rates::Entity::find()
            .filter(cap_rates::Column::PropertyId.eq(property_id))
            .one(&txn)
            .await?
            .ok_or(CapRateError::NotFound(property_id))?;

        let mut active: cap_rates::ActiveModel = current.into();
        active.cap_rate = Set(input.cap_rate);
        active.updated_at = Set(Utc::now().into());

        let saved = active.update(&txn).await?;
        refresh_quote(&txn, property_id, &self.policy).await?;
        txn.commit().await?;

        Ok(saved)
    }

    /// Gets the property's cap rate.
    ///
    /// # Errors
    ///
    /// Returns an error if no cap rate exists or the query fails.
    pub async fn get_cap_rate(&self, property_id: Uuid) -> Result<cap_rates::Model, CapRateError> {
        cap_rates::Entity::find()
            .filter(cap_rates::Column::PropertyId.eq(property_id))
            .one(&self.db)
            .await?
            .ok_or(CapRateError::NotFound(property_id))
    }
}
