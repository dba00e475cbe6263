// ABOUTME: Sheet management API handlers: list, create, rename, cascade delete.
// ABOUTME: Also covers the sheet-scoped record endpoints (list and create within a sheet).

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use tabula_core::Record;

use crate::api::{error_response, store_error_response};
use crate::app_state::SharedState;

/// Request body for creating a sheet.
#[derive(Debug, Deserialize)]
pub struct CreateSheetRequest {
    #[serde(default)]
    pub name: String,
}

/// Request body for renaming a sheet.
#[derive(Debug, Deserialize)]
pub struct RenameSheetRequest {
    #[serde(default)]
    pub name: String,
}

/// GET /sheets - List all sheets in insertion order.
pub async fn list_sheets(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.sheets.list())
}

/// POST /sheets - Create a sheet.
pub async fn create_sheet(
    State(state): State<SharedState>,
    body: Result<Json<CreateSheetRequest>, JsonRejection>,
) -> impl IntoResponse {
    let name = body.map(|Json(req)| req.name).unwrap_or_default();
    match state.sheets.create(&name) {
        Ok(sheet) => (StatusCode::CREATED, Json(sheet)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// PATCH /sheets/{id} - Rename a sheet. A blank name only refreshes the
/// modification timestamp.
pub async fn rename_sheet(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<RenameSheetRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(req)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "no json received");
    };
    match state.sheets.rename(&id, &req.name) {
        Ok(sheet) => Json(sheet).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// DELETE /sheets/{id} - Delete a sheet and cascade to its records.
pub async fn delete_sheet(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.sheets.delete(&id, &state.records) {
        Ok(()) => Json(serde_json::json!({
            "ok": true,
            "message": format!("Sheet {id} deleted"),
        }))
        .into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /sheets/{id}/records - List the records belonging to a sheet.
pub async fn list_sheet_records(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.records.filter_by_sheet(&id) {
        Ok(records) => Json(records).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// POST /sheets/{id}/records - Store a new record inside a sheet. The
/// sheet membership in the body is overwritten with the path id; the
/// sheet's existence is not verified.
pub async fn create_sheet_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<Record>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(mut record)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "no json received");
    };
    if record.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "no json received");
    }

    record.set_sheet_id(&id);
    match state.records.append(record) {
        Ok(stored) => Json(serde_json::json!({ "ok": true, "data": stored })).into_response(),
        Err(e) => store_error_response(e),
    }
}
