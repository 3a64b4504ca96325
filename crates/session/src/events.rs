//! Change notifications emitted by the session.
//!
//! Consumers (grid, status line) observe these instead of polling; the test
//! suite uses them to verify that stale attempts never produce a
//! `TableReplaced`.

use crate::session::ParsePhase;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The attempt with this generation moved to a new phase.
    PhaseChanged { generation: u64, phase: ParsePhase },

    /// The table was replaced wholesale by a successful attempt.
    /// INVARIANT: emitted at most once per generation.
    TableReplaced { generation: u64, rows: usize },

    /// The attempt ended in a failure at the named stage.
    AttemptFailed { generation: u64, stage: &'static str },
}

impl SessionEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::PhaseChanged { generation, .. }
            | Self::TableReplaced { generation, .. }
            | Self::AttemptFailed { generation, .. } => *generation,
        }
    }
}
