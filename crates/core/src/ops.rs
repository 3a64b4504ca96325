//! Pure reconciliation operations.
//!
//! Every function returns a fresh row sequence instead of mutating in place,
//! so the owning layer can swap its table atomically and stay render-stable
//! across edits.

use serde_json::Value;

use crate::error::TableError;
use crate::row::{Row, RowMap};

/// Ordered union of keys across all data rows, in first-occurrence order.
/// Zone rows are excluded. Falls back to `default` when there are no data
/// rows to observe.
pub fn derive_headers(rows: &[Row], default: &[String]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();

    for row in rows {
        if let Some(map) = row.data() {
            for key in map.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    if headers.is_empty() {
        return default.to_vec();
    }
    headers
}

/// Write a 1-based section-local serial into each data row's first key.
/// The counter resets when a zone row is passed, so rows under each heading
/// number from 1. Other fields are untouched.
pub fn with_serials(rows: &[Row]) -> Vec<Row> {
    let mut serial: u64 = 0;

    rows.iter()
        .map(|row| match row {
            Row::Zone(_) => {
                serial = 0;
                row.clone()
            }
            Row::Data(map) => {
                serial += 1;
                let mut map = map.clone();
                if let Some(first) = map.keys().next().cloned() {
                    map.insert(first, Value::from(serial));
                }
                Row::Data(map)
            }
        })
        .collect()
}

/// Rebuild every data row to exactly `fixed` keys: values carried over when
/// present, empty string otherwise. Guarantees identical row shape even when
/// the model omitted or invented keys. Zone rows pass through unchanged.
pub fn reconcile_to_fixed_schema(rows: &[Row], fixed: &[String]) -> Vec<Row> {
    rows.iter()
        .map(|row| match row {
            Row::Zone(_) => row.clone(),
            Row::Data(map) => {
                let mut rebuilt = RowMap::new();
                for header in fixed {
                    let value = map
                        .get(header)
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new()));
                    rebuilt.insert(header.clone(), value);
                }
                Row::Data(rebuilt)
            }
        })
        .collect()
}

/// Splice a blank row (empty string per header) immediately after
/// `after_index`. An index at or past the last row appends.
pub fn insert_row(rows: &[Row], after_index: usize, headers: &[String]) -> Vec<Row> {
    let position = after_index.saturating_add(1).min(rows.len());
    let mut out = rows.to_vec();
    out.insert(position, Row::blank(headers));
    out
}

/// Remove the row at `index`. Out of bounds is an error, not a panic.
pub fn remove_row(rows: &[Row], index: usize) -> Result<Vec<Row>, TableError> {
    if index >= rows.len() {
        return Err(TableError::RowOutOfBounds { index, len: rows.len() });
    }
    let mut out = rows.to_vec();
    out.remove(index);
    Ok(out)
}

/// Update a single field. On a zone row the write always targets the label,
/// whatever `header` says — a zone row never grows a second field.
pub fn set_cell(
    rows: &[Row],
    row_index: usize,
    header: &str,
    value: Value,
) -> Result<Vec<Row>, TableError> {
    if row_index >= rows.len() {
        return Err(TableError::RowOutOfBounds { index: row_index, len: rows.len() });
    }

    let mut out = rows.to_vec();
    out[row_index] = match &rows[row_index] {
        Row::Zone(_) => Row::Zone(crate::row::cell_text(&value)),
        Row::Data(map) => {
            let mut map = map.clone();
            map.insert(header.to_string(), value);
            Row::Data(map)
        }
    };
    Ok(out)
}
