// ABOUTME: Defines the Record type, an open-ended JSON object submitted by clients.
// ABOUTME: Only the reserved `id` and `sheetId` fields carry store semantics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved field holding the record's unique identifier.
pub const ID_FIELD: &str = "id";

/// Reserved field holding the owning sheet's identifier.
pub const SHEET_ID_FIELD: &str = "sheetId";

/// A single stored submission. The domain schema is caller-defined, so a
/// record is an open-ended JSON object; the store only interprets the
/// reserved `id` and `sheetId` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record's unique identifier, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.fields
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Set the record's identifier, overwriting any existing value.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.fields
            .insert(ID_FIELD.to_string(), Value::String(id.into()));
    }

    /// The owning sheet's identifier, if the record belongs to a sheet.
    pub fn sheet_id(&self) -> Option<&str> {
        self.fields.get(SHEET_ID_FIELD).and_then(Value::as_str)
    }

    /// Attach the record to a sheet, overwriting any existing membership.
    pub fn set_sheet_id(&mut self, sheet_id: impl Into<String>) {
        self.fields
            .insert(SHEET_ID_FIELD.to_string(), Value::String(sheet_id.into()));
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field, overwriting any existing value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Iterate fields in the order the client supplied them.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// True when the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_from(value: Value) -> Record {
        serde_json::from_value(value).expect("record from json")
    }

    #[test]
    fn id_round_trip() {
        let mut record = Record::new();
        assert!(record.id().is_none());

        record.set_id("01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(record.id(), Some("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
    }

    #[test]
    fn empty_id_is_treated_as_missing() {
        let record = record_from(json!({ "id": "", "name": "Ada" }));
        assert!(record.id().is_none());
    }

    #[test]
    fn non_string_id_is_treated_as_missing() {
        let record = record_from(json!({ "id": 42 }));
        assert!(record.id().is_none());
    }

    #[test]
    fn sheet_id_round_trip() {
        let mut record = record_from(json!({ "score": 90 }));
        assert!(record.sheet_id().is_none());

        record.set_sheet_id("S1");
        assert_eq!(record.sheet_id(), Some("S1"));
        assert_eq!(record.get("score"), Some(&json!(90)));
    }

    #[test]
    fn serializes_transparently() {
        let record = record_from(json!({ "name": "Ada", "score": 90 }));
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value, json!({ "name": "Ada", "score": 90 }));
    }

    #[test]
    fn preserves_client_field_order() {
        let record = record_from(json!({ "zulu": 1, "alpha": 2, "mike": 3 }));
        let names: Vec<&str> = record.fields().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }
}
