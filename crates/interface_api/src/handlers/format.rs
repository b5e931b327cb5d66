//! Input formatting handlers
//!
//! Apply the same normalization a form applies on each keystroke.

use axum::Json;
use validator::Validate;

use domain_person::{normalize_input, Field};

use crate::dto::format::{FormatRequest, FormatResponse};
use crate::error::ApiError;

/// Caps and masks a national ID
pub async fn format_national_id(
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, ApiError> {
    request.validate()?;
    Ok(Json(FormatResponse {
        formatted: normalize_input(Field::NationalId, &request.value),
    }))
}

/// Caps and masks a postal code
pub async fn format_postal_code(
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, ApiError> {
    request.validate()?;
    Ok(Json(FormatResponse {
        formatted: normalize_input(Field::PostalCode, &request.value),
    }))
}
