// ABOUTME: API module containing all HTTP handler functions for the tabulad REST API.
// ABOUTME: Organized into sub-modules for record CRUD, sheet management, and xlsx download.

pub mod export;
pub mod records;
pub mod sheets;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tabula_store::StoreError;

/// Build the failure envelope shared by every endpoint.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "ok": false, "error": message.into() })),
    )
        .into_response()
}

/// Map a store failure onto the wire: missing entities are 404, anything
/// else is a 500 carrying the underlying message.
pub(crate) fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, err.to_string()),
        _ => {
            tracing::error!("store operation failed: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
