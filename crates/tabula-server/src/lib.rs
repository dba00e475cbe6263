// ABOUTME: HTTP server for tabula, exposing the record and sheet stores as a REST API.
// ABOUTME: Uses Axum with shared store state, permissive CORS, and request tracing.

pub mod api;
pub mod app_state;
pub mod config;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, TabuladConfig};
pub use routes::create_router;
