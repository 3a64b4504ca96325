//! `tabforge-client` — client for the hosted model flows.
//!
//! Blocking reqwest client (no Tokio runtime required). The service is
//! opaque: it takes a file as a data URI (or a free-form prompt) and returns
//! a string that is *supposed* to be tabular JSON; recovering actual rows
//! from it is the normalizer's job, not ours.

pub mod client;
pub mod datauri;

pub use client::{
    ClientError, CreateTableResponse, ModelClient, ParseFileRequest, ParseFileResponse,
};
pub use datauri::{data_uri, file_to_data_uri, mime_for_extension};
