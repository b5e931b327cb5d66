//! HTTP API Layer
//!
//! This crate provides the REST API for the person registry using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Formatting, postal-code lookup and registration endpoints
//! - **Middleware**: Request IDs, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses with field-keyed messages
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_config(config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::SystemClock;
use domain_person::{Localizer, PersonError, RegistrationService, ViaCepAdapter};

use crate::config::ApiConfig;
use crate::handlers::{format, health, people, postal_codes};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RegistrationService>,
    pub localizer: Arc<Localizer>,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the production state: ViaCEP lookups and the system clock
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the configured locale is invalid
    pub fn from_config(config: ApiConfig) -> Result<Self, PersonError> {
        let adapter = ViaCepAdapter::new(config.viacep())?;
        let service = RegistrationService::new(Arc::new(adapter), Arc::new(SystemClock));
        Self::new(service, config)
    }

    /// Builds state around an existing service
    pub fn new(service: RegistrationService, config: ApiConfig) -> Result<Self, PersonError> {
        let localizer = Localizer::new(&config.locale)?;
        Ok(Self {
            service: Arc::new(service),
            localizer: Arc::new(localizer),
            config,
        })
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let format_routes = Router::new()
        .route("/national-id", post(format::format_national_id))
        .route("/postal-code", post(format::format_postal_code));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/postal-codes/:code", get(postal_codes::lookup_postal_code))
        .route("/people", get(people::list_people).post(people::register_person))
        .route("/people/:index", get(people::get_person).delete(people::remove_person))
        .nest("/format", format_routes)
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
