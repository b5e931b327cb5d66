//! Postal code lookup handlers

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use domain_person::{format_postal_code, Field, FieldError};

use super::request_metadata;
use crate::dto::people::AddressResponse;
use crate::{error::ApiError, AppState};

/// Resolves a postal code to an address
///
/// 422 for anything but eight digits, 404 for an unknown code, 502 when the
/// lookup service fails.
pub async fn lookup_postal_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Result<Json<AddressResponse>, ApiError> {
    let metadata = request_metadata(&headers);

    match state.service.resolve_postal_code(&code, metadata).await {
        Ok(address) => Ok(Json(AddressResponse {
            postal_code: format_postal_code(&code),
            address_line: address.format(),
            address,
        })),
        Err(error @ FieldError::PostalCodeNotFound) => {
            Err(ApiError::NotFound(state.localizer.render(&error)))
        }
        Err(error @ FieldError::PostalCodeLookupFailed) => {
            Err(ApiError::BadGateway(state.localizer.render(&error)))
        }
        Err(error) => Err(ApiError::Validation(BTreeMap::from([(
            Field::PostalCode,
            state.localizer.render(&error),
        )]))),
    }
}
