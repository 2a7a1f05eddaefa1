//! Cap rate routes: wizard step 3.

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

use quoin_core::wizard::{self, UnitRef, WizardStep};
use quoin_shared::AppError;
use quoin_shared::types::{PropertyId, UnitId};

use quoin_db::entities::cap_rates;
use quoin_db::repositories::cap_rate::{CapRateInput, CapRateRepository};
use quoin_db::repositories::unit::UnitRepository;

use crate::AppState;

use super::{app_error_response, validation_error_response};

/// Creates the cap rate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/properties/{property_id}/cap-rate",
        get(get_cap_rate).post(create_cap_rate).put(update_cap_rate),
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or updating a cap rate.
#[derive(Debug, Deserialize, Validate)]
pub struct CapRateRequest {
    /// Market capitalization rate, percent.
    #[validate(custom(function = validate_positive))]
    pub cap_rate: Decimal,
}

/// Response for a cap rate.
#[derive(Debug, Serialize)]
pub struct CapRateResponse {
    /// Record ID.
    pub id: Uuid,
    /// Owning property ID.
    pub property_id: Uuid,
    /// Market capitalization rate, percent.
    pub cap_rate: Decimal,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<cap_rates::Model> for CapRateResponse {
    fn from(model: cap_rates::Model) -> Self {
        Self {
            id: model.id,
            property_id: model.property_id,
            cap_rate: model.cap_rate,
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("positive"))
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Decides the step after a cap rate save: edit the first unit if the
/// roll already has one, else create a unit.
async fn next_after_cap_rate(
    state: &AppState,
    property_id: Uuid,
) -> Result<WizardStep, AppError> {
    let unit_repo = UnitRepository::new((*state.db).clone(), state.policy);
    let units = unit_repo.list_units(property_id).await.map_err(AppError::from)?;
    let refs: Vec<UnitRef> = units
        .into_iter()
        .map(|u| UnitRef {
            id: UnitId::from_uuid(u.id),
            unit_number: u.unit_number,
        })
        .collect();
    Ok(wizard::after_cap_rate_saved(
        PropertyId::from_uuid(property_id),
        &refs,
    ))
}

/// POST `/properties/{property_id}/cap-rate` - Wizard step 3: record the
/// cap rate.
async fn create_cap_rate(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<CapRateRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let repo = CapRateRepository::new((*state.db).clone(), state.policy);

    match repo
        .create_cap_rate(property_id, CapRateInput { cap_rate: body.cap_rate })
        .await
    {
        Ok(cap_rate) => {
            info!(%property_id, "cap rate created");
            let next = match next_after_cap_rate(&state, property_id).await {
                Ok(next) => next,
                Err(e) => return app_error_response(&e),
            };
            (
                StatusCode::CREATED,
                Json(json!({
                    "cap_rate": CapRateResponse::from(cap_rate),
                    "next": next,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, %property_id, "failed to create cap rate");
            app_error_response(&AppError::from(e))
        }
    }
}

/// PUT `/properties/{property_id}/cap-rate` - Revise the cap rate; the
/// quote refreshes in the same transaction.
async fn update_cap_rate(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<CapRateRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let repo = CapRateRepository::new((*state.db).clone(), state.policy);

    match repo
        .update_cap_rate(property_id, CapRateInput { cap_rate: body.cap_rate })
        .await
    {
        Ok(cap_rate) => {
            info!(%property_id, "cap rate updated");
            let next = match next_after_cap_rate(&state, property_id).await {
                Ok(next) => next,
                Err(e) => return app_error_response(&e),
            };
            Json(json!({
                "cap_rate": CapRateResponse::from(cap_rate),
                "next": next,
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, %property_id, "failed to update cap rate");
            app_error_response(&AppError::from(e))
        }
    }
}

/// GET `/properties/{property_id}/cap-rate` - Cap rate detail.
async fn get_cap_rate(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Response {
    let repo = CapRateRepository::new((*state.db).clone(), state.policy);

    match repo.get_cap_rate(property_id).await {
        Ok(cap_rate) => Json(CapRateResponse::from(cap_rate)).into_response(),
        Err(e) => app_error_response(&AppError::from(e)),
    }
}
