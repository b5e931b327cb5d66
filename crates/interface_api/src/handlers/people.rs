//! Person registration handlers

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use validator::Validate;

use domain_person::RosterEntry;

use super::request_metadata;
use crate::dto::people::RegisterPersonRequest;
use crate::{error::ApiError, AppState};

/// Lists registered people with their current ages
pub async fn list_people(State(state): State<AppState>) -> Json<Vec<RosterEntry>> {
    Json(state.service.people().await)
}

/// Gets a person by roster index
pub async fn get_person(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<RosterEntry>, ApiError> {
    state
        .service
        .person(index)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No person at index {index}")))
}

/// Registers a person
pub async fn register_person(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterPersonRequest>,
) -> Result<(StatusCode, Json<RosterEntry>), ApiError> {
    request.validate()?;

    state
        .service
        .register(request.into(), request_metadata(&headers))
        .await
        .map(|entry| (StatusCode::CREATED, Json(entry)))
        .map_err(|errors| ApiError::Validation(state.localizer.render_all(&errors)))
}

/// Removes a person; later entries move up by one
pub async fn remove_person(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, ApiError> {
    state.service.remove(index).await?;
    Ok(StatusCode::NO_CONTENT)
}
