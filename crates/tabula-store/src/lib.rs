// ABOUTME: Persistence layer for tabula: file-backed record and sheet stores.
// ABOUTME: Whole-file JSON read-modify-write with a derived xlsx export.

pub mod export;
pub mod records;
pub mod sheets;

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("{0}")]
    NotFound(String),
}

pub use export::write_workbook;
pub use records::RecordStore;
pub use sheets::SheetStore;
