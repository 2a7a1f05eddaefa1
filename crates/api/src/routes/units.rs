//! Rent-roll unit routes: wizard step 4.
//!
//! Unit submissions carry an optional signal (`continue`, `finish`,
//! `advance`) that steers the wizard; the signal never changes what gets
//! written.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use quoin_core::wizard::{self, UnitRef, UnitSignal, WizardStep};
use quoin_shared::AppError;
use quoin_shared::types::{PropertyId, UnitId};

use quoin_db::entities::units;
use quoin_db::repositories::unit::{CreateUnitInput, UnitRepository, UpdateUnitInput};

use crate::AppState;

use super::{app_error_response, validation_error_response};

/// Creates the unit routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/properties/{property_id}/units",
            post(create_unit).get(list_units),
        )
        .route(
            "/units/{unit_id}",
            get(get_unit).put(update_unit).delete(delete_unit),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a unit.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUnitRequest {
    /// Unit number within the property.
    #[validate(length(min = 1, max = 10))]
    pub unit_number: String,
    /// Monthly rent.
    #[validate(custom(function = validate_positive))]
    pub monthly_rent: Decimal,
    /// Vacancy rate, whole percent.
    #[validate(range(min = 0, max = 100))]
    pub vacancy_pct: i32,
    /// Bedroom count.
    #[validate(range(min = 1, max = 50))]
    pub bedrooms: i32,
    /// Bathroom count.
    #[validate(range(min = 1, max = 50))]
    pub bathrooms: i32,
    /// Wizard signal: continue (default), finish, or advance.
    pub signal: Option<String>,
}

/// Request body for updating a unit.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUnitRequest {
    /// New unit number.
    #[validate(length(min = 1, max = 10))]
    pub unit_number: Option<String>,
    /// New monthly rent.
    #[validate(custom(function = validate_positive))]
    pub monthly_rent: Option<Decimal>,
    /// New vacancy rate.
    #[validate(range(min = 0, max = 100))]
    pub vacancy_pct: Option<i32>,
    /// New bedroom count.
    #[validate(range(min = 1, max = 50))]
    pub bedrooms: Option<i32>,
    /// New bathroom count.
    #[validate(range(min = 1, max = 50))]
    pub bathrooms: Option<i32>,
    /// Wizard signal: continue (default), finish, or advance.
    pub signal: Option<String>,
}

/// Response for a unit.
#[derive(Debug, Serialize)]
pub struct UnitResponse {
    /// Unit ID.
    pub id: Uuid,
    /// Owning property ID.
    pub property_id: Uuid,
    /// Unit number.
    pub unit_number: String,
    /// Monthly rent.
    pub monthly_rent: Decimal,
    /// Vacancy rate, whole percent.
    pub vacancy_pct: i32,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Derived annual rent.
    pub annual_rent: Decimal,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<units::Model> for UnitResponse {
    fn from(model: units::Model) -> Self {
        Self {
            id: model.id,
            property_id: model.property_id,
            unit_number: model.unit_number,
            monthly_rent: model.monthly_rent,
            vacancy_pct: model.vacancy_pct,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            annual_rent: model.annual_rent,
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

fn parse_signal(signal: Option<&str>) -> Result<UnitSignal, Response> {
    match signal {
        None => Ok(UnitSignal::Continue),
        Some(raw) => UnitSignal::parse(raw).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": format!("Unknown signal: {raw}"),
                })),
            )
                .into_response()
        }),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Loads the property's rent roll as sequencer refs.
async fn rent_roll_refs(
    repo: &UnitRepository,
    property_id: Uuid,
) -> Result<Vec<UnitRef>, AppError> {
    let units = repo.list_units(property_id).await.map_err(AppError::from)?;
    Ok(units
        .into_iter()
        .map(|u| UnitRef {
            id: UnitId::from_uuid(u.id),
            unit_number: u.unit_number,
        })
        .collect())
}

/// Decides the step after a unit save, from the roll as persisted.
async fn next_after_unit_saved(
    repo: &UnitRepository,
    property_id: Uuid,
    unit_number: &str,
    signal: UnitSignal,
) -> Result<WizardStep, AppError> {
    let refs = rent_roll_refs(repo, property_id).await?;
    Ok(wizard::after_unit_saved(
        PropertyId::from_uuid(property_id),
        unit_number,
        &refs,
        signal,
    ))
}

/// POST `/properties/{property_id}/units` - Wizard step 4: add a unit to
/// the rent roll.
async fn create_unit(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<CreateUnitRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }
    let signal = match parse_signal(body.signal.as_deref()) {
        Ok(signal) => signal,
        Err(response) => return response,
    };

    let repo = UnitRepository::new((*state.db).clone(), state.policy);
    let input = CreateUnitInput {
        unit_number: body.unit_number,
        monthly_rent: body.monthly_rent,
        vacancy_pct: body.vacancy_pct,
        bedrooms: body.bedrooms,
        bathrooms: body.bathrooms,
    };

    match repo.create_unit(property_id, input).await {
        Ok(unit) => {
            info!(%property_id, unit_number = %unit.unit_number, "unit created");
            let next =
                match next_after_unit_saved(&repo, property_id, &unit.unit_number, signal).await {
                    Ok(next) => next,
                    Err(e) => return app_error_response(&e),
                };
            (
                StatusCode::CREATED,
                Json(json!({
                    "unit": UnitResponse::from(unit),
                    "next": next,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, %property_id, "failed to create unit");
            app_error_response(&AppError::from(e))
        }
    }
}

/// PUT `/units/{unit_id}` - Revise a unit; the quote refreshes in the
/// same transaction.
async fn update_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    Json(body): Json<UpdateUnitRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }
    let signal = match parse_signal(body.signal.as_deref()) {
        Ok(signal) => signal,
        Err(response) => return response,
    };

    let repo = UnitRepository::new((*state.db).clone(), state.policy);
    let input = UpdateUnitInput {
        unit_number: body.unit_number,
        monthly_rent: body.monthly_rent,
        vacancy_pct: body.vacancy_pct,
        bedrooms: body.bedrooms,
        bathrooms: body.bathrooms,
    };

    match repo.update_unit(unit_id, input).await {
        Ok(unit) => {
            info!(%unit_id, "unit updated");
            let next = match next_after_unit_saved(
                &repo,
                unit.property_id,
                &unit.unit_number,
                signal,
            )
            .await
            {
                Ok(next) => next,
                Err(e) => return app_error_response(&e),
            };
            Json(json!({
                "unit": UnitResponse::from(unit),
                "next": next,
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, %unit_id, "failed to update unit");
            app_error_response(&AppError::from(e))
        }
    }
}

/// DELETE `/units/{unit_id}` - Remove a unit; the wizard moves to the
/// next-higher unit, or to creating one if none remains.
async fn delete_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
) -> Response {
    let repo = UnitRepository::new((*state.db).clone(), state.policy);

    match repo.delete_unit(unit_id).await {
        Ok(deleted) => {
            info!(%unit_id, "unit deleted");
            let refs = match rent_roll_refs(&repo, deleted.property_id).await {
                Ok(refs) => refs,
                Err(e) => return app_error_response(&e),
            };
            let next = wizard::after_unit_deleted(
                PropertyId::from_uuid(deleted.property_id),
                &deleted.unit_number,
                &refs,
            );
            Json(json!({ "next": next })).into_response()
        }
        Err(e) => {
            error!(error = %e, %unit_id, "failed to delete unit");
            app_error_response(&AppError::from(e))
        }
    }
}

/// GET `/properties/{property_id}/units` - The property's rent roll.
async fn list_units(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Response {
    let repo = UnitRepository::new((*state.db).clone(), state.policy);

    match repo.list_units(property_id).await {
        Ok(units) => {
            let data: Vec<UnitResponse> = units.into_iter().map(UnitResponse::from).collect();
            Json(data).into_response()
        }
        Err(e) => {
            error!(error = %e, %property_id, "failed to list units");
            app_error_response(&AppError::from(e))
        }
    }
}

/// GET `/units/{unit_id}` - Unit detail.
async fn get_unit(State(state): State<AppState>, Path(unit_id): Path<Uuid>) -> Response {
    let repo = UnitRepository::new((*state.db).clone(), state.policy);

    match repo.get_unit(unit_id).await {
        Ok(unit) => Json(UnitResponse::from(unit)).into_response(),
        Err(e) => app_error_response(&AppError::from(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_signal_defaults_to_continue() {
        assert_eq!(parse_signal(None).unwrap(), UnitSignal::Continue);
    }

    #[rstest]
    #[case("continue", UnitSignal::Continue)]
    #[case("finish", UnitSignal::Finish)]
    #[case("advance", UnitSignal::Advance)]
    fn test_parse_signal_known_values(#[case] raw: &str, #[case] expected: UnitSignal) {
        assert_eq!(parse_signal(Some(raw)).unwrap(), expected);
    }

    #[test]
    fn test_parse_signal_rejects_unknown() {
        assert!(parse_signal(Some("delete")).is_err());
    }

    #[test]
    fn test_create_unit_request_rejects_out_of_range() {
        let body = CreateUnitRequest {
            unit_number: "1A".to_string(),
            monthly_rent: dec!(0),
            vacancy_pct: 101,
            bedrooms: 0,
            bathrooms: 51,
            signal: None,
        };
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("monthly_rent"));
        assert!(errors.field_errors().contains_key("vacancy_pct"));
        assert!(errors.field_errors().contains_key("bedrooms"));
        assert!(errors.field_errors().contains_key("bathrooms"));
    }

    #[test]
    fn test_create_unit_request_accepts_valid_input() {
        let body = CreateUnitRequest {
            unit_number: "1A".to_string(),
            monthly_rent: dec!(1000),
            vacancy_pct: 0,
            bedrooms: 2,
            bathrooms: 1,
            signal: Some("finish".to_string()),
        };
        assert!(body.validate().is_ok());
    }
}
