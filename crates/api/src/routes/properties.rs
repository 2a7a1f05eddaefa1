//! Property (address) routes: wizard step 1 plus list/detail/delete.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use quoin_core::wizard;
use quoin_shared::AppError;
use quoin_shared::types::{PageRequest, PageResponse, PropertyId};

use quoin_db::entities::properties;
use quoin_db::repositories::property::{
    CreatePropertyInput, PropertyRepository, UpdatePropertyInput,
};

use crate::AppState;

use super::{app_error_response, validation_error_response};

/// Creates the property routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route(
            "/properties/{property_id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a property.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    /// Street address.
    #[validate(length(min = 1, max = 100))]
    pub street: String,
    /// City.
    #[validate(length(min = 1, max = 75))]
    pub city: String,
    /// Two-letter state code.
    #[validate(length(equal = 2))]
    pub state: String,
    /// Five-digit ZIP code.
    #[validate(length(equal = 5), custom(function = validate_digits))]
    pub zip_code: String,
}

/// Request body for updating a property.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    /// New street address.
    #[validate(length(min = 1, max = 100))]
    pub street: Option<String>,
    /// New city.
    #[validate(length(min = 1, max = 75))]
    pub city: Option<String>,
    /// New state code.
    #[validate(length(equal = 2))]
    pub state: Option<String>,
    /// New ZIP code.
    #[validate(length(equal = 5), custom(function = validate_digits))]
    pub zip_code: Option<String>,
}

/// Response for a property.
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    /// Property ID.
    pub id: Uuid,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// ZIP code.
    pub zip_code: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<properties::Model> for PropertyResponse {
    fn from(model: properties::Model) -> Self {
        Self {
            id: model.id,
            street: model.street,
            city: model.city,
            state: model.state,
            zip_code: model.zip_code,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

fn validate_digits(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits_only"))
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/properties` - Wizard step 1: create the property address.
async fn create_property(
    State(state): State<AppState>,
    Json(body): Json<CreatePropertyRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let repo = PropertyRepository::new((*state.db).clone());
    let input = CreatePropertyInput {
        street: body.street,
        city: body.city,
        state: body.state,
        zip_code: body.zip_code,
    };

    match repo.create_property(input).await {
        Ok(property) => {
            info!(property_id = %property.id, "property created");
            let next = wizard::after_property_saved(PropertyId::from_uuid(property.id));
            (
                StatusCode::CREATED,
                Json(json!({
                    "property": PropertyResponse::from(property),
                    "next": next,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to create property");
            app_error_response(&AppError::from(e))
        }
    }
}

/// GET `/properties` - List properties ordered by street.
async fn list_properties(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Response {
    let repo = PropertyRepository::new((*state.db).clone());

    match repo.list_properties(&page).await {
        Ok((items, total)) => {
            let data: Vec<PropertyResponse> =
                items.into_iter().map(PropertyResponse::from).collect();
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to list properties");
            app_error_response(&AppError::from(e))
        }
    }
}

/// GET `/properties/{property_id}` - Property detail.
async fn get_property(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Response {
    let repo = PropertyRepository::new((*state.db).clone());

    match repo.get_property(property_id).await {
        Ok(property) => Json(PropertyResponse::from(property)).into_response(),
        Err(e) => app_error_response(&AppError::from(e)),
    }
}

/// PUT `/properties/{property_id}` - Revise the address; the wizard then
/// revisits the expense step.
async fn update_property(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<UpdatePropertyRequest>,
) -> Response {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let repo = PropertyRepository::new((*state.db).clone());
    let input = UpdatePropertyInput {
        street: body.street,
        city: body.city,
        state: body.state,
        zip_code: body.zip_code,
    };

    match repo.update_property(property_id, input).await {
        Ok(property) => {
            info!(property_id = %property.id, "property updated");
            let next = wizard::after_property_saved(PropertyId::from_uuid(property.id));
            Json(json!({
                "property": PropertyResponse::from(property),
                "next": next,
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to update property");
            app_error_response(&AppError::from(e))
        }
    }
}

/// DELETE `/properties/{property_id}` - Delete the property, cascading
/// its units, expenses, cap rate, and quote.
async fn delete_property(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Response {
    let repo = PropertyRepository::new((*state.db).clone());

    match repo.delete_property(property_id).await {
        Ok(()) => {
            info!(%property_id, "property deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to delete property");
            app_error_response(&AppError::from(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(state: &str, zip_code: &str) -> CreatePropertyRequest {
        CreatePropertyRequest {
            street: "742 Evergreen Terrace".to_string(),
            city: "Springfield".to_string(),
            state: state.to_string(),
            zip_code: zip_code.to_string(),
        }
    }

    #[test]
    fn test_valid_address_passes_validation() {
        assert!(request("NY", "10001").validate().is_ok());
    }

    #[rstest]
    #[case("N")] // too short
    #[case("NYC")] // too long
    fn test_state_must_be_two_letters(#[case] state: &str) {
        let errors = request(state, "10001").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("state"));
    }

    #[rstest]
    #[case("1000")] // too short
    #[case("100011")] // too long
    #[case("1000a")] // not numeric
    fn test_zip_code_must_be_five_digits(#[case] zip_code: &str) {
        let errors = request("NY", zip_code).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("zip_code"));
    }
}
