//! HTTP client for the two hosted flows.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client for the hosted parsing service (blocking).
#[derive(Clone)]
pub struct ModelClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: Option<String>,
}

/// Error type for model-flow calls.
#[derive(Debug)]
pub enum ClientError {
    /// No endpoint configured
    NotConfigured,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
    /// File I/O error
    Io(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::NotConfigured => {
                write!(f, "No model endpoint configured — run `tabforge doctor` for details")
            }
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ClientError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ClientError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// Request for the intelligent-data-parsing flow. Wire names follow the
/// hosted flow's schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFileRequest {
    /// `data:<mime>;base64,<payload>`
    pub file_data_uri: String,
    /// File type hint (e.g. "text/csv", "application/pdf")
    pub file_type: String,
    /// Field delimiter hint, if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

/// Reply from the parsing flow. `parsed_data` is JSON *text*, possibly
/// fenced or wrapped in prose.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFileResponse {
    pub parsed_data: String,
    #[serde(default)]
    pub parsing_notes: String,
}

/// Reply from the prompted table-creation flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableResponse {
    pub table_data: String,
}

impl ModelClient {
    /// Create a new client against `api_base`, optionally authenticated.
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("tabforge/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self { http, api_base: api_base.into(), api_key }
    }

    /// Ship a file to the parsing flow and return its raw reply.
    pub fn parse_file(&self, request: &ParseFileRequest) -> Result<ParseFileResponse, ClientError> {
        let url = format!("{}/flows/intelligent-data-parsing", self.api_base);
        let resp = self.post_json(&url, &serde_json::to_value(request).map_err(|e| ClientError::Parse(e.to_string()))?)?;
        resp.json::<ParseFileResponse>().map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Ask the table-creation flow to build a table from a description or
    /// pasted raw data.
    pub fn create_table(&self, prompt: &str) -> Result<CreateTableResponse, ClientError> {
        let url = format!("{}/flows/create-table", self.api_base);
        let resp = self.post_json(&url, &serde_json::json!({ "prompt": prompt }))?;
        resp.json::<CreateTableResponse>().map_err(|e| ClientError::Parse(e.to_string()))
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::blocking::Response, ClientError> {
        let mut req = self.http.post(url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http(status, body));
        }

        Ok(response)
    }
}
