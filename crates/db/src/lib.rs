//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Every write to a quote's constituent inputs (expenses, cap rate, rent
//! roll) runs in a transaction that also refreshes the property's derived
//! quote, so readers never observe a quote that is stale relative to the
//! latest input write.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    CapRateRepository, ExpensesRepository, PropertyRepository, QuoteRepository, UnitRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
