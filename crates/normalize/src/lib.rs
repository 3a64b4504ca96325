//! `tabforge-normalize` — Response Normalizer.
//!
//! The model is told to return bare JSON, but replies routinely arrive
//! wrapped in markdown fences or surrounded by prose. This crate recovers a
//! strict JSON value from whatever came back, then validates that it is
//! row-shaped. Pure functions of their input; no IO.

pub mod error;
pub mod extract;
pub mod shape;

pub use error::NormalizeError;
pub use extract::{normalize, normalize_value};
pub use shape::rows_from_value;
