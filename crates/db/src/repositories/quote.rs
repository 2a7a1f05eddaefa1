//! Quote repository and the quote derivation trigger.
//!
//! `refresh_quote` is the single place a quote row is written. It runs
//! inside the caller's transaction, immediately after the triggering
//! input write, so a committed input change is always visible together
//! with its derived quote.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use quoin_core::underwriting::{DebtPolicy, QuoteInputs, UnderwritingError, derive_quote};
use quoin_shared::AppError;
use quoin_shared::types::PageRequest;

use crate::entities::{cap_rates, expenses, properties, quotes, units};

/// Error types for quote operations.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// Quote not found.
    #[error("Quote not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::NotFound(_) => Self::NotFound(err.to_string()),
            QuoteError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Error types for the quote derivation trigger.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The derivation itself failed (e.g. zero cap rate). The caller's
    /// transaction must not commit.
    #[error(transparent)]
    Underwriting(#[from] UnderwritingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Recomputes and upserts the property's quote from its current inputs.
///
/// Runs on the caller's connection, which is expected to be a transaction
/// holding the property's row lock. If the expense schedule or cap rate
/// does not exist yet the refresh is skipped silently and `None` is
/// returned; the wizard guarantees both exist before unit entry is
/// reachable, so the skip is only observable when callers bypass the
/// wizard order.
///
/// # Errors
///
/// Returns an error if the derivation fails on unusable inputs (zero cap
/// rate, zero debt rate) or a database operation fails.
pub async fn refresh_quote<C: ConnectionTrait>(
    conn: &C,
    property_id: Uuid,
    policy: &DebtPolicy,
) -> Result<Option<quotes::Model>, RefreshError> {
    let expense_schedule = expenses::Entity::find()
        .filter(expenses::Column::PropertyId.eq(property_id))
        .one(conn)
        .await?;

    let cap_rate = cap_rates::Entity::find()
        .filter(cap_rates::Column::PropertyId.eq(property_id))
        .one(conn)
        .await?;

    let rent_roll = units::Entity::find()
        .filter(units::Column::PropertyId.eq(property_id))
        .all(conn)
        .await?;

    let inputs = match QuoteInputs::assemble(
        rent_roll.iter().map(|u| u.annual_rent).collect(),
        expense_schedule.map(|e| e.annual_expense),
        cap_rate.map(|c| c.cap_rate),
    ) {
        Ok(inputs) => inputs,
        Err(e) if e.is_missing_input() => {
            debug!(%property_id, "quote refresh skipped: {e}");
            return Ok(None);
        }
        Err(e) => return Err(RefreshError::Underwriting(e)),
    };

    let figures = derive_quote(&inputs, policy)?;
    let now = Utc::now().into();

    let existing = quotes::Entity::find()
        .filter(quotes::Column::PropertyId.eq(property_id))
        .one(conn)
        .await?;

    let saved = match existing {
        Some(quote) => {
            let mut active: quotes::ActiveModel = quote.into();
            active.annual_property_rent = Set(figures.annual_property_rent);
            active.debt_rate = Set(figures.debt_rate);
            active.noi = Set(figures.noi);
            active.annual_debt_payment = Set(figures.annual_debt_payment);
            active.property_value = Set(figures.property_value);
            active.dscr_loan_amount = Set(figures.dscr_loan_amount);
            active.loan_amount = Set(figures.loan_amount);
            active.updated_at = Set(now);
            active.update(conn).await?
        }
        None => {
            let active = quotes::ActiveModel {
                id: Set(Uuid::now_v7()),
                property_id: Set(property_id),
                annual_property_rent: Set(figures.annual_property_rent),
                debt_rate: Set(figures.debt_rate),
                noi: Set(figures.noi),
                annual_debt_payment: Set(figures.annual_debt_payment),
                property_value: Set(figures.property_value),
                dscr_loan_amount: Set(figures.dscr_loan_amount),
                loan_amount: Set(figures.loan_amount),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(conn).await?
        }
    };

    Ok(Some(saved))
}

/// A quote joined with its property's address.
#[derive(Debug, Clone)]
pub struct QuoteWithProperty {
    /// Quote record.
    pub quote: quotes::Model,
    /// The quoted property.
    pub property: properties::Model,
}

/// A quote with its property and on-demand expense total.
#[derive(Debug, Clone)]
pub struct QuoteDetail {
    /// Quote record.
    pub quote: quotes::Model,
    /// The quoted property.
    pub property: properties::Model,
    /// Total annual operating expense, read from the expense schedule.
    pub annual_property_expense: Option<Decimal>,
}

/// Quote repository for list/detail/delete operations.
///
/// Quotes are never created or edited directly: the derivation trigger
/// owns all quote writes.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    db: DatabaseConnection,
}

impl QuoteRepository {
    /// Creates a new quote repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists quotes (newest first) with their property addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_quotes(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<QuoteWithProperty>, u64), QuoteError> {
        let total = quotes::Entity::find().count(&self.db).await?;

        let quote_rows = quotes::Entity::find()
            .order_by_desc(quotes::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let mut result = Vec::with_capacity(quote_rows.len());

        for quote in quote_rows {
            let property = properties::Entity::find_by_id(quote.property_id)
                .one(&self.db)
                .await?;

            if let Some(property) = property {
                result.push(QuoteWithProperty { quote, property });
            }
        }

        Ok((result, total))
    }

    /// Gets a quote by ID with its property and expense total.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote is not found or the query fails.
    pub async fn get_quote(&self, quote_id: Uuid) -> Result<QuoteDetail, QuoteError> {
        let quote = quotes::Entity::find_by_id(quote_id)
            .one(&self.db)
            .await?
            .ok_or(QuoteError::NotFound(quote_id))?;

        let property = properties::Entity::find_by_id(quote.property_id)
            .one(&self.db)
            .await?
            .ok_or(QuoteError::NotFound(quote_id))?;

        let annual_property_expense = expenses::Entity::find()
            .filter(expenses::Column::PropertyId.eq(quote.property_id))
            .one(&self.db)
            .await?
            .map(|e| e.annual_expense);

        Ok(QuoteDetail {
            quote,
            property,
            annual_property_expense,
        })
    }

    /// Gets the quote for a property, if one has been derived.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_quote_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<quotes::Model>, QuoteError> {
        Ok(quotes::Entity::find()
            .filter(quotes::Column::PropertyId.eq(property_id))
            .one(&self.db)
            .await?)
    }

    /// Deletes a quote by deleting its owning property, cascading the
    /// property's units, expenses, cap rate, and the quote itself.
    ///
    /// Returns the ID of the deleted property.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote is not found or the database
    /// operation fails.
    pub async fn delete_quote(&self, quote_id: Uuid) -> Result<Uuid, QuoteError> {
        let txn = self.db.begin().await?;

        let quote = quotes::Entity::find_by_id(quote_id)
            .one(&txn)
            .await?
            .ok_or(QuoteError::NotFound(quote_id))?;

        properties::Entity::delete_by_id(quote.property_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(quote.property_id)
    }
}
