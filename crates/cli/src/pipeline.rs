//! The full parse flow, driven through the session state machine so the CLI
//! honors the same staleness and all-or-nothing rules as the grid.

use std::path::Path;

use tabforge_client::{file_to_data_uri, ModelClient, ParseFileRequest};
use tabforge_core::Table;
use tabforge_session::{Completion, ParseError, ParseSession};

/// Result of a successful attempt.
#[derive(Debug)]
pub struct ParseOutcome {
    pub table: Table,
    pub notes: String,
    pub generation: u64,
}

/// Upload `path` to the parsing flow and reconcile the reply into the
/// session's table. On any stage failure the session keeps its previous
/// table and the error says which stage sank the attempt.
pub fn run_parse(
    client: &ModelClient,
    session: &mut ParseSession,
    path: &Path,
    file_type: Option<&str>,
    delimiter: Option<String>,
) -> Result<ParseOutcome, ParseError> {
    let generation = session.begin()?;

    let (uri, mime) = match file_to_data_uri(path) {
        Ok(encoded) => encoded,
        Err(e) => {
            let err = ParseError::FileRead(e.to_string());
            session.fail(generation, err.clone());
            return Err(err);
        }
    };
    session.file_read(generation);

    let request = ParseFileRequest {
        file_data_uri: uri,
        file_type: file_type.unwrap_or(&mime).to_string(),
        delimiter,
    };
    let reply = match client.parse_file(&request) {
        Ok(reply) => reply,
        Err(e) => {
            let err = ParseError::ModelCall(e.to_string());
            session.fail(generation, err.clone());
            return Err(err);
        }
    };

    match session.complete(generation, &reply.parsed_data) {
        Completion::Replaced { .. } => Ok(ParseOutcome {
            table: session.table().clone(),
            notes: reply.parsing_notes,
            generation,
        }),
        Completion::Failed(err) => Err(err),
        Completion::Stale => Err(ParseError::Superseded),
    }
}

/// Drive the prompted table-creation flow through the same lifecycle.
pub fn run_create(
    client: &ModelClient,
    session: &mut ParseSession,
    prompt: &str,
) -> Result<ParseOutcome, ParseError> {
    let generation = session.begin()?;
    session.file_read(generation); // no file to read; straight to the model

    let reply = match client.create_table(prompt) {
        Ok(reply) => reply,
        Err(e) => {
            let err = ParseError::ModelCall(e.to_string());
            session.fail(generation, err.clone());
            return Err(err);
        }
    };

    match session.complete(generation, &reply.table_data) {
        Completion::Replaced { .. } => Ok(ParseOutcome {
            table: session.table().clone(),
            notes: String::new(),
            generation,
        }),
        Completion::Failed(err) => Err(err),
        Completion::Stale => Err(ParseError::Superseded),
    }
}
