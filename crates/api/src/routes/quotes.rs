//! Quote routes: list, detail, and delete.
//!
//! Quotes are derived records. They are never created or edited through
//! the API; deleting one deletes the owning property and everything under
//! it.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use quoin_core::wizard;
use quoin_shared::AppError;
use quoin_shared::types::{PageRequest, PageResponse};

use quoin_db::repositories::quote::{QuoteDetail, QuoteRepository, QuoteWithProperty};

use crate::AppState;

use super::app_error_response;

/// Creates the quote routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(list_quotes))
        .route("/quotes/{quote_id}", get(get_quote).delete(delete_quote))
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for a quote in the list view.
#[derive(Debug, Serialize)]
pub struct QuoteSummaryResponse {
    /// Quote ID.
    pub id: Uuid,
    /// Quoted property ID.
    pub property_id: Uuid,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// ZIP code.
    pub zip_code: String,
    /// Net operating income.
    pub noi: Decimal,
    /// Value implied by the cap rate.
    pub property_value: Decimal,
    /// Underwritten loan amount.
    pub loan_amount: Decimal,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<QuoteWithProperty> for QuoteSummaryResponse {
    fn from(row: QuoteWithProperty) -> Self {
        Self {
            id: row.quote.id,
            property_id: row.property.id,
            street: row.property.street,
            city: row.property.city,
            state: row.property.state,
            zip_code: row.property.zip_code,
            noi: row.quote.noi,
            property_value: row.quote.property_value,
            loan_amount: row.quote.loan_amount,
            created_at: row.quote.created_at.to_rfc3339(),
        }
    }
}

/// Response for the quote detail view.
#[derive(Debug, Serialize)]
pub struct QuoteDetailResponse {
    /// Quote ID.
    pub id: Uuid,
    /// Quoted property ID.
    pub property_id: Uuid,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// ZIP code.
    pub zip_code: String,
    /// Total annual rent across the rent roll.
    pub annual_property_rent: Decimal,
    /// Total annual operating expense, read on demand.
    pub annual_property_expense: Option<Decimal>,
    /// All-in debt rate, percent per annum.
    pub debt_rate: Decimal,
    /// Net operating income.
    pub noi: Decimal,
    /// Annual debt payment at the DSCR target.
    pub annual_debt_payment: Decimal,
    /// Value implied by the cap rate.
    pub property_value: Decimal,
    /// Loan sized from cash flow.
    pub dscr_loan_amount: Decimal,
    /// Underwritten loan amount.
    pub loan_amount: Decimal,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<QuoteDetail> for QuoteDetailResponse {
    fn from(detail: QuoteDetail) -> Self {
        Self {
            id: detail.quote.id,
            property_id: detail.property.id,
            street: detail.property.street,
            city: detail.property.city,
            state: detail.property.state,
            zip_code: detail.property.zip_code,
            annual_property_rent: detail.quote.annual_property_rent,
            annual_property_expense: detail.annual_property_expense,
            debt_rate: detail.quote.debt_rate,
            noi: detail.quote.noi,
            annual_debt_payment: detail.quote.annual_debt_payment,
            property_value: detail.quote.property_value,
            dscr_loan_amount: detail.quote.dscr_loan_amount,
            loan_amount: detail.quote.loan_amount,
            created_at: detail.quote.created_at.to_rfc3339(),
            updated_at: detail.quote.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/quotes` - List quotes (newest first) with property addresses.
async fn list_quotes(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Response {
    let repo = QuoteRepository::new((*state.db).clone());

    match repo.list_quotes(&page).await {
        Ok((rows, total)) => {
            let data: Vec<QuoteSummaryResponse> =
                rows.into_iter().map(QuoteSummaryResponse::from).collect();
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to list quotes");
            app_error_response(&AppError::from(e))
        }
    }
}

/// GET `/quotes/{quote_id}` - Quote detail with the full derivation.
async fn get_quote(State(state): State<AppState>, Path(quote_id): Path<Uuid>) -> Response {
    let repo = QuoteRepository::new((*state.db).clone());

    match repo.get_quote(quote_id).await {
        Ok(detail) => Json(QuoteDetailResponse::from(detail)).into_response(),
        Err(e) => app_error_response(&AppError::from(e)),
    }
}

/// DELETE `/quotes/{quote_id}` - Delete the quote's property, cascading
/// all of its records, then return to the quote list.
async fn delete_quote(State(state): State<AppState>, Path(quote_id): Path<Uuid>) -> Response {
    let repo = QuoteRepository::new((*state.db).clone());

    match repo.delete_quote(quote_id).await {
        Ok(property_id) => {
            info!(%quote_id, %property_id, "quote and property deleted");
            Json(json!({
                "deleted_property_id": property_id,
                "next": wizard::after_quote_deleted(),
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, %quote_id, "failed to delete quote");
            app_error_response(&AppError::from(e))
        }
    }
}
