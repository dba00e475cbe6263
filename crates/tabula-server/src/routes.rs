// ABOUTME: Route definitions for the tabulad HTTP API.
// ABOUTME: Assembles all handlers into a single Axum Router with CORS and request tracing.

use axum::Router;
use axum::routing::{get, patch, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state. CORS
/// is fully permissive: the frontend is served from a separate origin.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/upload", post(api::records::create_record))
        .route(
            "/records",
            get(api::records::list_records).delete(api::records::delete_all_records),
        )
        .route(
            "/records/{id}",
            put(api::records::update_record).delete(api::records::delete_record),
        )
        .route("/export/excel", get(api::export::download_excel))
        .route(
            "/sheets",
            get(api::sheets::list_sheets).post(api::sheets::create_sheet),
        )
        .route(
            "/sheets/{id}",
            patch(api::sheets::rename_sheet).delete(api::sheets::delete_sheet),
        )
        .route(
            "/sheets/{id}/records",
            get(api::sheets::list_sheet_records).post(api::sheets::create_sheet_record),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Plain-text banner confirming the server is up.
async fn home() -> &'static str {
    "tabulad is running"
}

/// GET /health - Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
