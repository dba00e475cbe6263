// ABOUTME: Record CRUD API handlers: upload, list, update, delete, delete-all.
// ABOUTME: Bodies are open-ended JSON objects; ids are assigned server-side.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tabula_core::Record;

use crate::api::{error_response, store_error_response};
use crate::app_state::SharedState;

/// POST /upload - Store a new record at the head of the list.
pub async fn create_record(
    State(state): State<SharedState>,
    body: Result<Json<Record>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(record)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "no json received");
    };
    if record.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "no json received");
    }

    match state.records.append(record) {
        Ok(stored) => Json(serde_json::json!({ "ok": true, "data": stored })).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /records - List all records, newest first.
pub async fn list_records(State(state): State<SharedState>) -> impl IntoResponse {
    match state.records.read_all() {
        Ok(records) => Json(records).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// DELETE /records - Delete every record.
pub async fn delete_all_records(State(state): State<SharedState>) -> impl IntoResponse {
    match state.records.delete_all() {
        Ok(()) => Json(serde_json::json!({ "ok": true, "message": "All records deleted" }))
            .into_response(),
        Err(e) => store_error_response(e),
    }
}

/// PUT /records/{id} - Replace a record wholesale. The stored id wins over
/// any id in the body.
pub async fn update_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<Record>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(record)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "no json received for update");
    };

    match state.records.replace_by_id(&id, record) {
        Ok(updated) => Json(serde_json::json!({
            "ok": true,
            "data": updated,
            "message": format!("Record {id} updated"),
        }))
        .into_response(),
        Err(e) => store_error_response(e),
    }
}

/// DELETE /records/{id} - Delete a single record by id.
pub async fn delete_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.records.delete_by_id(&id) {
        Ok(()) => Json(serde_json::json!({
            "ok": true,
            "message": format!("Record {id} deleted"),
        }))
        .into_response(),
        Err(e) => store_error_response(e),
    }
}
