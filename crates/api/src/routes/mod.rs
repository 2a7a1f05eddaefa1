//! API route definitions.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::ValidationErrors;

use quoin_shared::AppError;

use crate::AppState;

pub mod cap_rates;
pub mod expenses;
pub mod health;
pub mod properties;
pub mod quotes;
pub mod units;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(properties::routes())
        .merge(expenses::routes())
        .merge(cap_rates::routes())
        .merge(units::routes())
        .merge(quotes::routes())
}

/// Maps an application error to its JSON response.
pub(crate) fn app_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Maps request validation failures to a 400 response.
pub(crate) fn validation_error_response(errors: &ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "VALIDATION_ERROR",
            "message": errors.to_string(),
        })),
    )
        .into_response()
}
