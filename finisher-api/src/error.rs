//! Error types for finisher-api
//!
//! Maps the shared error taxonomy onto HTTP responses. Validation errors
//! carry a machine-readable `field` so the UI can highlight the offending
//! input; everything else gets a code and a human message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Shared taxonomy error (validation, entitlement, plan, provider)
    #[error(transparent)]
    Core(#[from] finisher_common::Error),

    /// Payment collaborator failure (502)
    #[error("Checkout error: {0}")]
    Checkout(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use finisher_common::Error;

        let (status, error_code, field) = match &self {
            ApiError::Core(Error::Validation { field, .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", Some(*field))
            }
            ApiError::Core(Error::Entitlement { .. }) => {
                (StatusCode::FORBIDDEN, "ENTITLEMENT_DENIED", None)
            }
            ApiError::Core(Error::PlanNotFound(_)) => {
                (StatusCode::NOT_FOUND, "PLAN_NOT_FOUND", None)
            }
            ApiError::Core(Error::Provider(_)) => {
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", None)
            }
            ApiError::Core(Error::ProviderTimeout(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "PROVIDER_TIMEOUT", None)
            }
            ApiError::Core(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                None,
            ),
            ApiError::Checkout(_) => (StatusCode::BAD_GATEWAY, "CHECKOUT_ERROR", None),
        };

        let message = self.to_string();
        let body = match field {
            Some(field) => Json(json!({
                "error": {
                    "code": error_code,
                    "message": message,
                    "field": field,
                }
            })),
            None => Json(json!({
                "error": {
                    "code": error_code,
                    "message": message,
                }
            })),
        };

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
