//! `tabforge-session` — the parse attempt lifecycle.
//!
//! One table, one writer. Each uploaded file runs through
//! `Idle → Reading → AwaitingModel → {Reconciled | Failed}`, and the table
//! is only ever replaced wholesale by a successful attempt. Attempts carry a
//! generation number; results arriving for a superseded generation are
//! discarded instead of clobbering a newer attempt's state.

pub mod error;
pub mod events;
pub mod session;

pub use error::ParseError;
pub use events::SessionEvent;
pub use session::{Completion, ParsePhase, ParseSession, Snapshot};
