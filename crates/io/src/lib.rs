// Table export/import operations

pub mod csv;
pub mod json;
pub mod xlsx;
