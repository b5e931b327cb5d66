//! API error handling

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_person::{Field, PersonError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Field-level validation failures, already localized
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(BTreeMap<Field, String>),

    /// The postal-code service could not answer
    #[error("Upstream failure: {0}")]
    BadGateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    /// Field-keyed messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<Field, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_type, errors) = match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", Some(errors))
            }
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "bad_gateway", None),
            ApiError::Internal(_) => {
                error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PersonError> for ApiError {
    fn from(err: PersonError) -> Self {
        match err {
            PersonError::RosterIndexOutOfRange { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let details = err
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ApiError::BadRequest(format!("invalid request fields: {details}"))
    }
}
