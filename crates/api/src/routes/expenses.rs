//! Expense schedule routes: wizard step 2.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use quoin_core::wizard;
use quoin_shared::AppError;
use quoin_shared::types::PropertyId;

use quoin_db::entities::expenses;
use quoin_db::repositories::expenses::{ExpenseScheduleInput, ExpensesRepository};

use crate::AppState;

use super::{app_error_response, validation_error_response};

/// Creates the expense schedule routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/properties/{property_id}/expenses",
        get(get_expenses).post(create_expenses).put(update_expenses),
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or updating an expense schedule.
#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseScheduleRequest {
    /// Marketing costs, annualized.
    #[validate(custom(function = validate_non_negative))]
    pub marketing: Decimal,
    /// Property taxes, annualized.
    #[validate(custom(function = validate_non_negative))]
    pub taxes: Decimal,
    /// Insurance premiums, annualized.
    #[validate(custom(function = validate_non_negative))]
    pub insurance: Decimal,
    /// Repairs and maintenance, annualized.
    #[validate(custom(function = validate_non_negative))]
    pub repairs: Decimal,
    /// Administration overhead, annualized.
    #[validate(custom(function = validate_non_negative))]
    pub administration: Decimal,
}

impl ExpenseScheduleRequest {
    fn into_input(self) -> ExpenseScheduleInput {
        ExpenseScheduleInput {
            marketing: self.marketing,
            taxes: self.taxes,
            insurance: self.insurance,
            repairs: self.repairs,
            administration: self.administration,
        }
    }
}

/// Response for an expense schedule.
#[derive(Debug, Serialize)]
pub struct ExpensesResponse {
    /// Record ID.
    pub id: Uuid,
    /// Owning property ID.
    pub property_id: Uuid,
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
    /// Derived total annual expense.
    pub annual_expense: Decimal,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<expenses::Model> for ExpensesResponse {
    fn from(model: expenses::Model) -> Self {
        Self {
            id: model.id,
            property_id: model.property_id,
            marketing: model.marketing,
            taxes: model.taxes,
            insurance: model.insurance,
            repairs: model.repairs,
            administration: model.administration,
            annual_expense: model.annual_expense,
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        Err(ValidationError::new("non_negative"))
    } else {
        Ok(())
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/properties/{property_id}/expenses` - Wizard step 2: record the
/// expense schedule.
async fn create_expenses(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<ExpenseScheduleRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let repo = ExpensesRepository::new((*state.db).clone(), state.policy);

    match repo.create_expenses(property_id, body.into_input()).await {
        Ok(expenses) => {
            info!(%property_id, "expense schedule created");
            let next = wizard::after_expenses_saved(PropertyId::from_uuid(property_id));
            (
                StatusCode::CREATED,
                Json(json!({
                    "expenses": ExpensesResponse::from(expenses),
                    "next": next,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, %property_id, "failed to create expense schedule");
            app_error_response(&AppError::from(e))
        }
    }
}

/// PUT `/properties/{property_id}/expenses` - Revise the expense
/// schedule; the quote refreshes in the same transaction.
async fn update_expenses(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<ExpenseScheduleRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let repo = ExpensesRepository::new((*state.db).clone(), state.policy);

    match repo.update_expenses(property_id, body.into_input()).await {
        Ok(expenses) => {
            info!(%property_id, "expense schedule updated");
            let next = wizard::after_expenses_saved(PropertyId::from_uuid(property_id));
            Json(json!({
                "expenses": ExpensesResponse::from(expenses),
                "next": next,
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, %property_id, "failed to update expense schedule");
            app_error_response(&AppError::from(e))
        }
    }
}

/// GET `/properties/{property_id}/expenses` - Expense schedule detail.
async fn get_expenses(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Response {
    let repo = ExpensesRepository::new((*state.db).clone(), state.policy);

    match repo.get_expenses(property_id).await {
        Ok(expenses) => Json(ExpensesResponse::from(expenses)).into_response(),
        Err(e) => app_error_response(&AppError::from(e)),
    }
}
