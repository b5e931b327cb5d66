//! Request handlers

pub mod health;
pub mod format;
pub mod postal_codes;
pub mod people;

use axum::http::HeaderMap;

use core_kernel::OperationMetadata;

/// Header carrying the request ID set by the request-id layer
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Operation metadata correlated with the incoming request
pub(crate) fn request_metadata(headers: &HeaderMap) -> Option<OperationMetadata> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(OperationMetadata::with_correlation_id)
}
