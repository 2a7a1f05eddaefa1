//! Property repository for address database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use quoin_shared::AppError;
use quoin_shared::types::PageRequest;

use crate::entities::properties;

/// Error types for property operations.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// Property not found.
    #[error("Property not found: {0}")]
    NotFound(Uuid),

    /// A property with the same address already exists.
    #[error("A property with this address already exists")]
    DuplicateAddress,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PropertyError> for AppError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NotFound(_) => Self::NotFound(err.to_string()),
            PropertyError::DuplicateAddress => Self::Conflict(err.to_string()),
            PropertyError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a property.
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// Five-digit ZIP code.
    pub zip_code: String,
}

/// Input for updating a property.
#[derive(Debug, Clone, Default)]
pub struct UpdatePropertyInput {
    /// New street address.
    pub street: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state code.
    pub state: Option<String>,
    /// New ZIP code.
    pub zip_code: Option<String>,
}

/// Property repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new property.
    ///
    /// # Errors
    ///
    /// Returns an error if a property with the same (street, city, state,
    /// zip) already exists or the database operation fails.
    pub async fn create_property(
        &self,
        input: CreatePropertyInput,
    ) -> Result<properties::Model, PropertyError> {
        let existing = properties::Entity::find()
            .filter(properties::Column::Street.eq(&input.street))
            .filter(properties::Column::City.eq(&input.city))
            .filter(properties::Column::State.eq(&input.state))
            .filter(properties::Column::ZipCode.eq(&input.zip_code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(PropertyError::DuplicateAddress);
        }

        let now = Utc::now().into();
        let property = properties::ActiveModel {
            id: Set(Uuid::now_v7()),
            street: Set(input.street),
            city: Set(input.city),
            state: Set(input.state),
            zip_code: Set(input.zip_code),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique constraint backstops the pre-check under concurrency.
        property.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                PropertyError::DuplicateAddress
            } else {
                PropertyError::Database(e)
            }
        })
    }

    /// Gets a property by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not found or the query fails.
    pub async fn get_property(&self, property_id: Uuid) -> Result<properties::Model, PropertyError> {
        properties::Entity::find_by_id(property_id)
            .one(&self.db)
            .await?
            .ok_or(PropertyError::NotFound(property_id))
    }

    /// Lists properties ordered by street, with the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_properties(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<properties::Model>, u64), PropertyError> {
        let total = properties::Entity::find().count(&self.db).await?;

        let items = properties::Entity::find()
            .order_by_asc(properties::Column::Street)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Updates a property's address fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not found, the new address
    /// collides with another property, or the database operation fails.
    pub async fn update_property(
        &self,
        property_id: Uuid,
        input: UpdatePropertyInput,
    ) -> Result<properties::Model, PropertyError> {
        let current = self.get_property(property_id).await?;

        let street = input.street.unwrap_or_else(|| current.street.clone());
        let city = input.city.unwrap_or_else(|| current.city.clone());
        let state = input.state.unwrap_or_else(|| current.state.clone());
        let zip_code = input.zip_code.unwrap_or_else(|| current.zip_code.clone());

        let collision = properties::Entity::find()
            .filter(properties::Column::Id.ne(property_id))
            .filter(properties::Column::Street.eq(&street))
            .filter(properties::Column::City.eq(&city))
            .filter(properties::Column::State.eq(&state))
            .filter(properties::Column::ZipCode.eq(&zip_code))
            .one(&self.db)
            .await?;

        if collision.is_some() {
            return Err(PropertyError::DuplicateAddress);
        }

        let mut active: properties::ActiveModel = current.into();
        active.street = Set(street);
        active.city = Set(city);
        active.state = Set(state);
        active.zip_code = Set(zip_code);
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                PropertyError::DuplicateAddress
            } else {
                PropertyError::Database(e)
            }
        })
    }

    /// Deletes a property, cascading its units, expenses, cap rate, and
    /// quote.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not found or the database
    /// operation fails.
    pub async fn delete_property(&self, property_id: Uuid) -> Result<(), PropertyError> {
        let result = properties::Entity::delete_by_id(property_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(PropertyError::NotFound(property_id));
        }

        Ok(())
    }
}

/// Takes a row-level lock on the property, serializing all writers that
/// touch the property's quote inputs.
pub(crate) async fn lock_property<C: ConnectionTrait>(
    conn: &C,
    property_id: Uuid,
) -> Result<Option<properties::Model>, DbErr> {
    properties::Entity::find_by_id(property_id)
        .lock_exclusive()
        .one(conn)
        .await
}
