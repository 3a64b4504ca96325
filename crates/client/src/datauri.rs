//! Data-URI encoding for file uploads.
//!
//! The hosted flow takes file bytes as `data:<mime>;base64,<payload>`; the
//! MIME type doubles as the flow's file-type hint.

use std::path::Path;

use base64::Engine;

use crate::client::ClientError;

/// Encode raw bytes as a data URI.
pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD;
    format!("data:{};base64,{}", mime, b64.encode(bytes))
}

/// MIME type for the upload formats the tool accepts, by file extension.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "csv" => "text/csv",
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Read a file and return `(data_uri, mime)` ready for a parse request.
pub fn file_to_data_uri(path: &Path) -> Result<(String, String), ClientError> {
    let bytes = std::fs::read(path).map_err(|e| ClientError::Io(e.to_string()))?;
    let mime = path
        .extension()
        .and_then(|e| e.to_str())
        .map(mime_for_extension)
        .unwrap_or("application/octet-stream");
    Ok((data_uri(&bytes, mime), mime.to_string()))
}
