//! Unit repository for rent-roll database operations.
//!
//! Every write (including deletes) refreshes the property's quote in the
//! same transaction, so the stored quote always reflects the current rent
//! roll.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use quoin_core::underwriting::{DebtPolicy, UnderwritingError, annual_unit_rent};
use quoin_shared::AppError;

use crate::entities::units;

use super::property::lock_property;
use super::quote::{RefreshError, refresh_quote};

/// Error types for unit operations.
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    /// Unit not found.
    #[error("Unit not found: {0}")]
    NotFound(Uuid),

    /// A unit with this number already exists for the property.
    #[error("Unit {unit_number} already exists for this property")]
    DuplicateUnitNumber {
        /// The colliding unit number.
        unit_number: String,
    },

    /// The owning property does not exist.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Monthly rent must be positive.
    #[error("Monthly rent must be positive")]
    NonPositiveRent,

    /// The quote refresh failed; the write was rolled back.
    #[error(transparent)]
    Underwriting(UnderwritingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RefreshError> for UnitError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Underwriting(e) => Self::Underwriting(e),
            RefreshError::Database(e) => Self::Database(e),
        }
    }
}

impl From<UnitError> for AppError {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::NotFound(_) | UnitError::PropertyNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            UnitError::DuplicateUnitNumber { .. } => Self::Conflict(err.to_string()),
            UnitError::NonPositiveRent => Self::Validation(err.to_string()),
            UnitError::Underwriting(_) => Self::BusinessRule(err.to_string()),
            UnitError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a unit.
#[derive(Debug, Clone)]
pub struct CreateUnitInput {
    /// Unit number within the property.
    pub unit_number: String,
    /// Monthly rent.
    pub monthly_rent: Decimal,
    /// Vacancy rate, whole percent (0-100).
    pub vacancy_pct: i32,
    /// Bedroom count (1-50).
    pub bedrooms: i32,
    /// Bathroom count (1-50).
    pub bathrooms: i32,
}

/// Input for updating a unit.
#[derive(Debug, Clone, Default)]
pub struct UpdateUnitInput {
    /// New unit number.
    pub unit_number: Option<String>,
    /// New monthly rent.
    pub monthly_rent: Option<Decimal>,
    /// New vacancy rate.
    pub vacancy_pct: Option<i32>,
    /// New bedroom count.
    pub bedrooms: Option<i32>,
    /// New bathroom count.
    pub bathrooms: Option<i32>,
}

/// Unit repository for rent-roll CRUD operations.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    db: DatabaseConnection,
    policy: DebtPolicy,
}

impl UnitRepository {
    /// Creates a new unit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, policy: DebtPolicy) -> Self {
        Self { db, policy }
    }

    /// Adds a unit to the property's rent roll.
    ///
    /// The annual rent is derived from the monthly rent, and the
    /// property's quote is refreshed in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the property does not exist, the unit number
    /// is taken, the rent is not positive, or the write fails.
    pub async fn create_unit(
        &self,
        property_id: Uuid,
        input: CreateUnitInput,
    ) -> Result<units::Model, UnitError> {
        if input.monthly_rent <= Decimal::ZERO {
            return Err(UnitError::NonPositiveRent);
        }

        let txn = self.db.begin().await?;

        lock_property(&txn, property_id)
            .await?
            .ok_or(UnitError::PropertyNotFound(property_id))?;

        let existing = units::Entity::find()
            .filter(units::Column::PropertyId.eq(property_id))
            .filter(units::Column::UnitNumber.eq(&input.unit_number))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(UnitError::DuplicateUnitNumber {
                unit_number: input.unit_number,
            });
        }

        let now = Utc::now().into();
        let active = units::ActiveModel {
            id: Set(Uuid::now_v7()),
            property_id: Set(property_id),
            unit_number: Set(input.unit_number.clone()),
            monthly_rent: Set(input.monthly_rent),
            vacancy_pct: Set(input.vacancy_pct),
            bedrooms: Set(input.bedrooms),
            bathrooms: Set(input.bathrooms),
            annual_rent: Set(annual_unit_rent(input.monthly_rent)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = active.insert(&txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                UnitError::DuplicateUnitNumber {
                    unit_number: input.unit_number,
                }
            } else {
                UnitError::Database(e)
            }
        })?;

        refresh_quote(&txn, property_id, &self.policy).await?;
        txn.commit().await?;

        Ok(saved)
    }

    /// Updates a unit in the rent roll.
    ///
    /// The annual rent is recomputed on every write, and the property's
    /// quote is refreshed in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is not found, the new unit number is
    /// taken, the rent is not positive, or the write fails.
    pub async fn update_unit(
        &self,
        unit_id: Uuid,
        input: UpdateUnitInput,
    ) -> Result<units::Model, UnitError> {
        let txn = self.db.begin().await?;

        let unit = units::Entity::find_by_id(unit_id)
            .one(&txn)
            .await?
            .ok_or(UnitError::NotFound(unit_id))?;

        lock_property(&txn, unit.property_id)
            .await?
            .ok_or(UnitError::PropertyNotFound(unit.property_id))?;

        // Re-read under the property lock; the first read raced other
        // writers.
        let unit = units::Entity::find_by_id(unit_id)
            .one(&txn)
            .await?
            .ok_or(UnitError::NotFound(unit_id))?;

        let unit_number = input.unit_number.unwrap_or_else(|| unit.unit_number.clone());
        let monthly_rent = input.monthly_rent.unwrap_or(unit.monthly_rent);

        if monthly_rent <= Decimal::ZERO {
            return Err(UnitError::NonPositiveRent);
        }

        if unit_number != unit.unit_number {
            let collision = units::Entity::find()
                .filter(units::Column::PropertyId.eq(unit.property_id))
                .filter(units::Column::UnitNumber.eq(&unit_number))
                .filter(units::Column::Id.ne(unit_id))
                .one(&txn)
                .await?;

            if collision.is_some() {
                return Err(UnitError::DuplicateUnitNumber { unit_number });
            }
        }

        let property_id = unit.property_id;
        let vacancy_pct = input.vacancy_pct.unwrap_or(unit.vacancy_pct);
        let bedrooms = input.bedrooms.unwrap_or(unit.bedrooms);
        let bathrooms = input.bathrooms.unwrap_or(unit.bathrooms);

        let mut active: units::ActiveModel = unit.into();
        active.unit_number = Set(unit_number);
        active.monthly_rent = Set(monthly_rent);
        active.vacancy_pct = Set(vacancy_pct);
        active.bedrooms = Set(bedrooms);
        active.bathrooms = Set(bathrooms);
        active.annual_rent = Set(annual_unit_rent(monthly_rent));
        active.updated_at = Set(Utc::now().into());

        let saved = active.update(&txn).await?;
        refresh_quote(&txn, property_id, &self.policy).await?;
        txn.commit().await?;

        Ok(saved)
    }

    /// Removes a unit from the rent roll, returning the deleted record.
    ///
    /// The property's quote is refreshed in the same transaction so it no
    /// longer counts the removed unit's rent.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is not found or the write fails.
    pub async fn delete_unit(&self, unit_id: Uuid) -> Result<units::Model, UnitError> {
        let txn = self.db.begin().await?;

        let unit = units::Entity::find_by_id(unit_id)
            .one(&txn)
            .await?
            .ok_or(UnitError::NotFound(unit_id))?;

        lock_property(&txn, unit.property_id)
            .await?
            .ok_or(UnitError::PropertyNotFound(unit.property_id))?;

        units::Entity::delete_by_id(unit_id).exec(&txn).await?;

        refresh_quote(&txn, unit.property_id, &self.policy).await?;
        txn.commit().await?;

        Ok(unit)
    }

    /// Lists the property's rent roll in unit-number order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_units(&self, property_id: Uuid) -> Result<Vec<units::Model>, UnitError> {
        Ok(units::Entity::find()
            .filter(units::Column::PropertyId.eq(property_id))
            .order_by_asc(units::Column::UnitNumber)
            .all(&self.db)
            .await?)
    }

    /// Gets a unit by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is not found or the query fails.
    pub async fn get_unit(&self, unit_id: Uuid) -> Result<units::Model, UnitError> {
        units::Entity::find_by_id(unit_id)
            .one(&self.db)
            .await?
            .ok_or(UnitError::NotFound(unit_id))
    }
}
