// ABOUTME: File-backed sheet store managing the named groupings of records.
// ABOUTME: Lenient reads, insertion-order persistence, and cascade delete into the record store.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tabula_core::Sheet;

use crate::StoreError;
use crate::records::RecordStore;

/// File-backed store for the sheet list. Sheets persist in insertion
/// order. Unlike record reads, sheet reads are lenient: an unreadable or
/// malformed file is treated as an empty list.
pub struct SheetStore {
    path: PathBuf,
}

impl SheetStore {
    /// Open the store, creating parent directories and an empty backing
    /// file when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        if let Some(parent) = store.path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !store.path.exists() {
            fs::write(&store.path, "[]")?;
        }
        Ok(store)
    }

    /// All sheets in insertion order. A missing or malformed backing file
    /// yields an empty list rather than an error.
    pub fn list(&self) -> Vec<Sheet> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("failed to read sheet list: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(sheets) => sheets,
            Err(e) => {
                tracing::warn!("malformed sheet list, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Create a sheet. The name is trimmed with an "Untitled" fallback;
    /// new sheets append at the tail of the list.
    pub fn create(&self, name: &str) -> Result<Sheet, StoreError> {
        let sheet = Sheet::new(name);
        let mut sheets = self.list();
        sheets.push(sheet.clone());
        self.persist(&sheets)?;
        Ok(sheet)
    }

    /// Rename a sheet. A blank new name leaves the old name in place but
    /// still refreshes `updatedAt`. Returns the updated sheet.
    pub fn rename(&self, id: &str, new_name: &str) -> Result<Sheet, StoreError> {
        let mut sheets = self.list();
        let sheet = sheets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("sheet {id} not found")))?;

        let trimmed = new_name.trim();
        if !trimmed.is_empty() {
            sheet.name = trimmed.to_string();
        }
        sheet.updated_at = Utc::now();
        let updated = sheet.clone();

        self.persist(&sheets)?;
        Ok(updated)
    }

    /// Delete a sheet and cascade to its records. Two phases with no
    /// atomicity across them: the reduced sheet list is persisted first,
    /// then the dependent records are removed. A crash between the phases
    /// leaves orphaned records pointing at a sheet that no longer exists.
    pub fn delete(&self, id: &str, records: &RecordStore) -> Result<(), StoreError> {
        let mut sheets = self.list();
        let before = sheets.len();
        sheets.retain(|s| s.id != id);
        if sheets.len() == before {
            return Err(StoreError::NotFound(format!("sheet {id} not found")));
        }
        self.persist(&sheets)?;
        records.delete_by_sheet(id)
    }

    fn persist(&self, sheets: &[Sheet]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(sheets)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tabula_core::Record;
    use tempfile::TempDir;

    fn open_sheets(dir: &TempDir) -> SheetStore {
        SheetStore::open(dir.path().join("sheets.json")).unwrap()
    }

    fn open_records(dir: &TempDir) -> RecordStore {
        RecordStore::open(
            dir.path().join("records.json"),
            dir.path().join("records.xlsx"),
        )
        .unwrap()
    }

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_appends_in_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = open_sheets(&dir);

        let math = store.create("Math").unwrap();
        let art = store.create("Art").unwrap();

        let sheets = store.list();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].id, math.id);
        assert_eq!(sheets[1].id, art.id);
    }

    #[test]
    fn create_trims_and_defaults_the_name() {
        let dir = TempDir::new().unwrap();
        let store = open_sheets(&dir);

        assert_eq!(store.create("  Math ").unwrap().name, "Math");
        assert_eq!(store.create("   ").unwrap().name, "Untitled");
    }

    #[test]
    fn list_is_lenient_on_garbage() {
        let dir = TempDir::new().unwrap();
        let store = open_sheets(&dir);
        store.create("Math").unwrap();

        fs::write(dir.path().join("sheets.json"), "{ not json").unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn rename_updates_name_and_refreshes_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = open_sheets(&dir);
        let sheet = store.create("Math").unwrap();

        let renamed = store.rename(&sheet.id, "  Science ").unwrap();
        assert_eq!(renamed.name, "Science");
        assert!(renamed.updated_at >= sheet.updated_at);
        assert_eq!(renamed.created_at, sheet.created_at);

        let listed = store.list();
        assert_eq!(listed[0].name, "Science");
    }

    #[test]
    fn rename_with_blank_name_keeps_the_old_name() {
        let dir = TempDir::new().unwrap();
        let store = open_sheets(&dir);
        let sheet = store.create("Math").unwrap();

        let renamed = store.rename(&sheet.id, "   ").unwrap();
        assert_eq!(renamed.name, "Math");
    }

    #[test]
    fn rename_unknown_sheet_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = open_sheets(&dir);

        let err = store.rename("missing", "X").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn delete_cascades_to_records() {
        let dir = TempDir::new().unwrap();
        let sheets = open_sheets(&dir);
        let records = open_records(&dir);

        let sheet = sheets.create("Math").unwrap();
        records
            .append(record(json!({ "score": 90, "sheetId": sheet.id })))
            .unwrap();
        records.append(record(json!({ "name": "Loose" }))).unwrap();

        sheets.delete(&sheet.id, &records).unwrap();

        assert!(sheets.list().is_empty());
        let remaining = records.read_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].get("name"), Some(&json!("Loose")));
        assert!(records.filter_by_sheet(&sheet.id).unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_sheet_is_not_found() {
        let dir = TempDir::new().unwrap();
        let sheets = open_sheets(&dir);
        let records = open_records(&dir);

        let err = sheets.delete("missing", &records).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
