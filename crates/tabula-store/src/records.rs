// ABOUTME: File-backed record store with whole-file read-modify-write persistence.
// ABOUTME: Normalizes missing record ids at open time and mirrors every mutation to xlsx.

use std::fs;
use std::path::{Path, PathBuf};

use tabula_core::Record;
use ulid::Ulid;

use crate::StoreError;
use crate::export;

/// File-backed store for the record list. Every operation reads the full
/// backing file, mutates the list in memory, and writes the full result
/// back; the xlsx mirror is regenerated on every persist. There is no
/// locking: concurrent writers race on the read-modify-write cycle and
/// the last write wins.
pub struct RecordStore {
    data_path: PathBuf,
    export_path: PathBuf,
}

impl RecordStore {
    /// Open the store. Creates parent directories and an empty backing
    /// file when absent, then runs the one-time id normalization pass:
    /// any record lacking a non-empty `id` gets a fresh ULID, and the
    /// patched list is persisted immediately so the backfill never
    /// repeats for the same record.
    pub fn open(
        data_path: impl Into<PathBuf>,
        export_path: impl Into<PathBuf>,
    ) -> Result<Self, StoreError> {
        let store = Self {
            data_path: data_path.into(),
            export_path: export_path.into(),
        };

        if let Some(parent) = store.data_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Some(parent) = store.export_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !store.data_path.exists() {
            fs::write(&store.data_path, "[]")?;
        }

        let mut records = store.read_all()?;
        let mut backfilled = 0usize;
        for record in &mut records {
            if record.id().is_none() {
                record.set_id(Ulid::new().to_string());
                backfilled += 1;
            }
        }
        if backfilled > 0 {
            tracing::info!("assigned ids to {} legacy records", backfilled);
            store.persist(&records)?;
        } else {
            // The download endpoint streams the canonical export file, so
            // make sure it exists even before the first mutation.
            export::write_workbook(&records, &store.export_path)?;
        }

        Ok(store)
    }

    /// Path of the canonical xlsx export mirroring the full record list.
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Read the entire record list, newest first. Strict: an absent or
    /// malformed backing file is an error. The file is pre-created at
    /// open, so absence only happens when something external removed it.
    pub fn read_all(&self) -> Result<Vec<Record>, StoreError> {
        let raw = fs::read_to_string(&self.data_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Store a record at the head of the list (newest first). Any
    /// client-supplied id is overwritten with a fresh ULID. Returns the
    /// stored record.
    pub fn append(&self, mut record: Record) -> Result<Record, StoreError> {
        let mut records = self.read_all()?;
        record.set_id(Ulid::new().to_string());
        records.insert(0, record.clone());
        self.persist(&records)?;
        Ok(record)
    }

    /// Replace the first record whose id matches, preserving its position
    /// in the list. The id in the replacement body is ignored and
    /// overwritten with the path id.
    pub fn replace_by_id(&self, id: &str, mut record: Record) -> Result<Record, StoreError> {
        let mut records = self.read_all()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("record {id} not found")))?;
        record.set_id(id);
        *slot = record.clone();
        self.persist(&records)?;
        Ok(record)
    }

    /// Delete every record whose id matches. Ids are unique, so a single
    /// match is the expected case. Errors when nothing matched.
    pub fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.id() != Some(id));
        if records.len() == before {
            return Err(StoreError::NotFound(format!("record {id} not found")));
        }
        self.persist(&records)
    }

    /// Unconditionally clear the record list.
    pub fn delete_all(&self) -> Result<(), StoreError> {
        self.persist(&[])
    }

    /// All records belonging to the given sheet, in stored order.
    pub fn filter_by_sheet(&self, sheet_id: &str) -> Result<Vec<Record>, StoreError> {
        let records = self.read_all()?;
        Ok(records
            .into_iter()
            .filter(|r| r.sheet_id() == Some(sheet_id))
            .collect())
    }

    /// Remove every record belonging to the given sheet. Zero matches is
    /// not an error; this is the record half of a sheet cascade delete.
    pub fn delete_by_sheet(&self, sheet_id: &str) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        records.retain(|r| r.sheet_id() != Some(sheet_id));
        self.persist(&records)
    }

    /// Write the full list back to disk and regenerate the xlsx mirror.
    fn persist(&self, records: &[Record]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.data_path, json)?;
        export::write_workbook(records, &self.export_path)?;
        Ok(())
    }
}
