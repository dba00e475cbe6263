// ABOUTME: Xlsx export generation for the record list.
// ABOUTME: Columns are the union of record field names, excluding the reserved id.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};
use serde_json::Value;
use tabula_core::Record;
use tabula_core::record::ID_FIELD;

use crate::StoreError;

/// Write the given records to an xlsx workbook at `path`. Each record is
/// one row; columns are the union of field names across all records in
/// first-seen order, minus the reserved `id` field. An empty record list
/// produces a valid workbook with a single empty worksheet.
pub fn write_workbook(records: &[Record], path: &Path) -> Result<(), StoreError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let columns = column_union(records);
    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name.as_str())?;
    }

    for (row, record) in records.iter().enumerate() {
        for (col, name) in columns.iter().enumerate() {
            if let Some(value) = record.get(name) {
                write_value(worksheet, (row + 1) as u32, col as u16, value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Union of field names across all records in first-seen order, with the
/// reserved `id` field dropped.
fn column_union(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for (name, _) in record.fields() {
            if name != ID_FIELD && !columns.iter().any(|c| c == name) {
                columns.push(name.clone());
            }
        }
    }
    columns
}

/// Write one JSON value into a cell. Strings, numbers, and booleans map
/// to native cell types; null leaves the cell blank; arrays and objects
/// are serialized to compact JSON text.
fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
) -> Result<(), StoreError> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => {
            worksheet.write_number(row, col, n.as_f64().unwrap_or(0.0))?;
        }
        Value::String(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}
