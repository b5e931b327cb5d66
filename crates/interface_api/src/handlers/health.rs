//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use core_kernel::HealthCheckResult;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub postal_code_lookup: HealthCheckResult,
}

/// Health check endpoint
///
/// The service itself is up whenever it answers; an open circuit on the
/// postal-code adapter only degrades it.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let postal_code_lookup = state.service.postal_code_health().await;
    let status = if postal_code_lookup.is_healthy() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        postal_code_lookup,
    })
}
