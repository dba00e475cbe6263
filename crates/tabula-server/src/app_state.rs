// ABOUTME: Shared application state for the tabulad HTTP server.
// ABOUTME: Owns the record and sheet stores and the export directory layout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tabula_store::{RecordStore, SheetStore, StoreError};

/// Shared state accessible by all Axum handlers. The stores hold only
/// paths, so there is no interior locking; concurrent mutations race on
/// the backing files and the last write wins.
pub struct AppState {
    pub records: RecordStore,
    pub sheets: SheetStore,
    export_dir: PathBuf,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Open both stores under the given home directory, creating the
    /// layout (records.json, sheets.json, exports/) on first start.
    pub fn open(home: &Path) -> Result<Self, StoreError> {
        let export_dir = home.join("exports");
        let records = RecordStore::open(
            home.join("records.json"),
            export_dir.join("records.xlsx"),
        )?;
        let sheets = SheetStore::open(home.join("sheets.json"))?;
        Ok(Self {
            records,
            sheets,
            export_dir,
        })
    }

    /// Path of the xlsx export scoped to a single sheet.
    pub fn sheet_export_path(&self, sheet_id: &str) -> PathBuf {
        self.export_dir.join(format!("records-{sheet_id}.xlsx"))
    }
}
