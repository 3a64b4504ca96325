//! `tabforge-core` — Table data model and pure reconciliation operations.
//!
//! Pure engine crate: rows in, rows out. No IO, HTTP, or CLI dependencies.
//! Mutating operations return a new row sequence so the caller's single
//! source of truth can be replaced atomically.

pub mod error;
pub mod ops;
pub mod row;
pub mod table;

pub use error::TableError;
pub use row::{cell_text, Row, RowMap, ZONE_KEY};
pub use table::{HeaderSchema, Table};
