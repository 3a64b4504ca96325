//! The single-writer parse session.

use tabforge_core::{HeaderSchema, Table};
use tabforge_normalize::{normalize, rows_from_value};

use crate::error::ParseError;
use crate::events::SessionEvent;

/// Lifecycle of the current (or most recent) attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePhase {
    Idle,
    Reading,
    AwaitingModel,
    Reconciled,
    Failed,
}

impl ParsePhase {
    /// True while an attempt is outstanding and a new one must not start.
    pub fn in_flight(&self) -> bool {
        matches!(self, ParsePhase::Reading | ParsePhase::AwaitingModel)
    }
}

/// Outcome of delivering a model reply to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Table replaced; attempt reconciled.
    Replaced { rows: usize },
    /// Reply belonged to a superseded attempt and was discarded.
    Stale,
    /// Attempt failed; the previous table is untouched.
    Failed(ParseError),
}

/// Read snapshot for exporters: a clone of the table stamped with the
/// generation that produced it, so a concurrent replacement can be detected
/// by comparing stamps.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: Table,
    pub generation: u64,
}

/// Owns the one in-memory table and funnels every mutation through the pure
/// reconciler operations. Table replacement is all-or-nothing per attempt.
#[derive(Debug)]
pub struct ParseSession {
    table: Table,
    schema: HeaderSchema,
    phase: ParsePhase,
    generation: u64,
    last_error: Option<ParseError>,
    events: Vec<SessionEvent>,
}

impl ParseSession {
    /// Session seeded with the built-in example table and observed headers.
    pub fn new() -> ParseSession {
        ParseSession::with_schema(HeaderSchema::Observed)
    }

    /// Session with a configured header policy (fixed schema revisions).
    pub fn with_schema(schema: HeaderSchema) -> ParseSession {
        ParseSession {
            table: Table::default(),
            schema,
            phase: ParsePhase::Idle,
            generation: 0,
            last_error: None,
            events: Vec::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn phase(&self) -> ParsePhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    /// Read snapshot for exporters.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { table: self.table.clone(), generation: self.generation }
    }

    /// Drain events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a new attempt. Returns its generation; refuses while a prior
    /// attempt is in flight (the upload surface is disabled meanwhile).
    pub fn begin(&mut self) -> Result<u64, ParseError> {
        if self.phase.in_flight() {
            return Err(ParseError::AttemptInFlight);
        }
        self.generation += 1;
        self.last_error = None;
        self.set_phase(ParsePhase::Reading);
        Ok(self.generation)
    }

    /// The file content was read; the model call is next. Returns false for
    /// a stale generation (result discarded).
    pub fn file_read(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) || self.phase != ParsePhase::Reading {
            return false;
        }
        self.set_phase(ParsePhase::AwaitingModel);
        true
    }

    /// Deliver the raw model reply. Normalization, shape validation, and
    /// table construction happen here; the table is replaced only if all of
    /// them succeed.
    pub fn complete(&mut self, generation: u64, reply: &str) -> Completion {
        if !self.is_current(generation) || !self.phase.in_flight() {
            return Completion::Stale;
        }

        match self.reconcile(reply) {
            Ok(table) => {
                let rows = table.len();
                self.table = table;
                self.set_phase(ParsePhase::Reconciled);
                self.events.push(SessionEvent::TableReplaced { generation, rows });
                Completion::Replaced { rows }
            }
            Err(err) => {
                self.record_failure(generation, err.clone());
                Completion::Failed(err)
            }
        }
    }

    /// Report a stage failure (file read, model call). Stale generations are
    /// ignored; current ones end the attempt with the table untouched.
    pub fn fail(&mut self, generation: u64, error: ParseError) {
        if !self.is_current(generation) || !self.phase.in_flight() {
            return;
        }
        self.record_failure(generation, error);
    }

    /// Back to idle with the built-in example table, as on file removal.
    pub fn reset(&mut self) {
        self.generation += 1; // orphan any in-flight attempt
        self.table = Table::default();
        self.last_error = None;
        self.set_phase(ParsePhase::Idle);
    }

    fn reconcile(&self, reply: &str) -> Result<Table, ParseError> {
        let value = normalize(reply)?;
        let rows = rows_from_value(&value)?;
        Ok(Table::new(rows, self.schema.clone()))
    }

    fn record_failure(&mut self, generation: u64, error: ParseError) {
        let stage = error.stage();
        self.last_error = Some(error);
        self.set_phase(ParsePhase::Failed);
        self.events.push(SessionEvent::AttemptFailed { generation, stage });
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn set_phase(&mut self, phase: ParsePhase) {
        self.phase = phase;
        self.events.push(SessionEvent::PhaseChanged { generation: self.generation, phase });
    }
}

impl Default for ParseSession {
    fn default() -> Self {
        Self::new()
    }
}
