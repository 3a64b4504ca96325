//! The in-memory table: an ordered row sequence plus a header policy.
//!
//! Headers are computed, never stored. Every structural edit goes through
//! the pure operations in `ops` and produces a whole new `Table`, so callers
//! holding the single source of truth replace it atomically.

use chrono::Local;
use serde_json::Value;

use crate::error::TableError;
use crate::ops;
use crate::row::Row;

/// How the canonical header list is decided. The revisions of this tool
/// disagreed on this; both behaviors are valid configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderSchema {
    /// Free-form union of observed keys, first-seen order.
    Observed,
    /// Fixed domain schema: rows are blank-filled to exactly this list.
    Fixed(Vec<String>),
}

impl HeaderSchema {
    /// `Fixed` when a header list is supplied, `Observed` otherwise.
    pub fn from_fixed(fixed: Option<Vec<String>>) -> HeaderSchema {
        match fixed {
            Some(headers) if !headers.is_empty() => HeaderSchema::Fixed(headers),
            _ => HeaderSchema::Observed,
        }
    }
}

/// Display-ready table. Created fresh on each successful parse; read-only
/// for exporters.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
    schema: HeaderSchema,
}

impl Table {
    /// Build a table from reconciled rows. Under a fixed schema the rows are
    /// blank-filled up front so every data row already has identical shape.
    pub fn new(rows: Vec<Row>, schema: HeaderSchema) -> Table {
        let rows = match &schema {
            HeaderSchema::Fixed(fixed) => ops::reconcile_to_fixed_schema(&rows, fixed),
            HeaderSchema::Observed => rows,
        };
        Table { rows, schema }
    }

    /// The built-in example table shown before the first parse.
    pub fn example() -> Table {
        let today = Local::now().format("%Y-%m-%d").to_string();
        let mut map = crate::row::RowMap::new();
        for (header, value) in [
            ("SN", "1"),
            ("Location", "Example Location"),
            ("Activity", "Example Activity"),
            ("Engineering Status", "Pending"),
            ("Engineering", today.as_str()),
            ("Procurement", "In Progress"),
            ("Procurement Date", today.as_str()),
            ("Execution_clearence", "2024-08-15"),
            ("Execution_start", "2024-08-20"),
            ("Execution_finish", "2024-08-30"),
        ] {
            map.insert(header.to_string(), Value::String(value.to_string()));
        }
        Table {
            rows: vec![Row::Data(map)],
            schema: HeaderSchema::Observed,
        }
    }

    /// Header list of the built-in example table, used as the derivation
    /// fallback for empty tables.
    pub fn default_headers() -> Vec<String> {
        [
            "SN",
            "Location",
            "Activity",
            "Engineering Status",
            "Engineering",
            "Procurement",
            "Procurement Date",
            "Execution_clearence",
            "Execution_start",
            "Execution_finish",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn schema(&self) -> &HeaderSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Canonical header list: the fixed schema when configured, otherwise
    /// the observed union (falling back to the example headers).
    pub fn headers(&self) -> Vec<String> {
        match &self.schema {
            HeaderSchema::Fixed(fixed) => fixed.clone(),
            HeaderSchema::Observed => ops::derive_headers(&self.rows, &Self::default_headers()),
        }
    }

    /// Rows with section-local serial numbers applied (display form).
    pub fn numbered_rows(&self) -> Vec<Row> {
        ops::with_serials(&self.rows)
    }

    /// New table with a blank row spliced after `after_index`.
    pub fn insert_row(&self, after_index: usize) -> Table {
        let rows = ops::insert_row(&self.rows, after_index, &self.headers());
        Table { rows, schema: self.schema.clone() }
    }

    /// New table with the row at `index` removed.
    pub fn remove_row(&self, index: usize) -> Result<Table, TableError> {
        let rows = ops::remove_row(&self.rows, index)?;
        Ok(Table { rows, schema: self.schema.clone() })
    }

    /// New table with a single cell updated. Zone rows take the value as
    /// their label regardless of `header`.
    pub fn set_cell(&self, row_index: usize, header: &str, value: Value) -> Result<Table, TableError> {
        let rows = ops::set_cell(&self.rows, row_index, header, value)?;
        Ok(Table { rows, schema: self.schema.clone() })
    }

    /// JSON array-of-objects form consumed by exporters and saved files.
    pub fn to_value(&self) -> Value {
        Value::Array(self.rows.iter().map(Row::to_value).collect())
    }
}

impl Default for Table {
    fn default() -> Table {
        Table::example()
    }
}
