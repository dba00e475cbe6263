// ABOUTME: Xlsx download handler streaming the canonical or sheet-scoped export.
// ABOUTME: Sheet-scoped downloads regenerate the file from a fresh store snapshot.

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tabula_store::write_workbook;

use crate::api::{error_response, store_error_response};
use crate::app_state::SharedState;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Query parameters for the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "sheetId")]
    pub sheet_id: Option<String>,
}

/// GET /export/excel - Download the xlsx export: the canonical full-list
/// file, or one regenerated on demand for a single sheet.
pub async fn download_excel(
    State(state): State<SharedState>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let (path, filename) = match query.sheet_id.as_deref().filter(|s| !s.is_empty()) {
        Some(sheet_id) => {
            // Sheet ids are ULIDs; anything else cannot name an export file.
            if !sheet_id.chars().all(|c| c.is_ascii_alphanumeric()) {
                return error_response(StatusCode::BAD_REQUEST, "invalid sheetId");
            }
            let records = match state.records.filter_by_sheet(sheet_id) {
                Ok(records) => records,
                Err(e) => return store_error_response(e),
            };
            let path = state.sheet_export_path(sheet_id);
            if let Err(e) = write_workbook(&records, &path) {
                return store_error_response(e);
            }
            (path, format!("records-{sheet_id}.xlsx"))
        }
        None => (
            state.records.export_path().to_path_buf(),
            "records.xlsx".to_string(),
        ),
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to read export file: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app_state::{AppState, SharedState};
    use crate::routes::create_router;
    use axum::body::Body;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        let dir = tempfile::TempDir::new().unwrap();
        Arc::new(AppState::open(&dir.keep()).unwrap())
    }

    #[tokio::test]
    async fn export_streams_an_xlsx_attachment() {
        let app = create_router(test_state());
        let resp = app
            .oneshot(Request::get("/export/excel").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["content-type"],
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert!(
            resp.headers()["content-disposition"]
                .to_str()
                .unwrap()
                .contains("records.xlsx")
        );

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        // Xlsx files are zip archives.
        assert_eq!(&body[..2], b"PK");
    }

    #[tokio::test]
    async fn sheet_scoped_export_uses_the_sheet_filename() {
        let state = test_state();
        let sheet = state.sheets.create("Math").unwrap();

        let app = create_router(Arc::clone(&state));
        let resp = app
            .oneshot(
                Request::get(format!("/export/excel?sheetId={}", sheet.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert!(
            resp.headers()["content-disposition"]
                .to_str()
                .unwrap()
                .contains(&format!("records-{}.xlsx", sheet.id))
        );
    }

    #[tokio::test]
    async fn export_rejects_a_path_shaped_sheet_id() {
        let app = create_router(test_state());
        let resp = app
            .oneshot(
                Request::get("/export/excel?sheetId=..%2F..%2Fetc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
    }
}
