// ABOUTME: Defines the Sheet struct, a named grouping that partitions records.
// ABOUTME: Sheet names are trimmed on creation with an "Untitled" fallback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Name substituted when a sheet is created with a blank name.
pub const DEFAULT_SHEET_NAME: &str = "Untitled";

/// A named grouping of records. Records point at a sheet through their
/// `sheetId` field; the sheet itself never holds its records.
/// Serialized camelCase to match the wire format the frontend consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sheet {
    /// Create a new Sheet. The name is trimmed; an empty result falls back
    /// to "Untitled". Generates a fresh ULID and stamps both timestamps
    /// with the current time.
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_SHEET_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        let now = Utc::now();
        Self {
            id: Ulid::new().to_string(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_new_trims_name() {
        let sheet = Sheet::new("  Math  ");
        assert_eq!(sheet.name, "Math");
    }

    #[test]
    fn sheet_new_falls_back_to_untitled() {
        assert_eq!(Sheet::new("").name, "Untitled");
        assert_eq!(Sheet::new("   ").name, "Untitled");
    }

    #[test]
    fn sheet_new_stamps_equal_timestamps() {
        let sheet = Sheet::new("Math");
        assert_eq!(sheet.created_at, sheet.updated_at);
        assert!(sheet.created_at <= Utc::now());
    }

    #[test]
    fn sheet_new_generates_distinct_ids() {
        let a = Sheet::new("A");
        let b = Sheet::new("B");
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn sheet_serializes_camel_case() {
        let sheet = Sheet::new("Math");
        let value = serde_json::to_value(&sheet).expect("serialize");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["name"], "Math");
    }
}
