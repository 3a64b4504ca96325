use std::fmt;

use tabforge_normalize::NormalizeError;

/// Everything that can sink a parse attempt. All variants are user-visible
/// and non-fatal: the attempt ends, the table stays as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The selected file could not be read.
    FileRead(String),
    /// The model call rejected or returned no data.
    ModelCall(String),
    /// The reply could not be normalized into row JSON. Shape problems
    /// (valid JSON that is not a table) travel inside the same variant.
    Normalize(NormalizeError),
    /// A second attempt was started while one was in flight.
    AttemptInFlight,
    /// The attempt's reply arrived after something (a reset or a newer
    /// attempt) had already advanced the generation; the result was dropped.
    Superseded,
}

impl ParseError {
    /// Which stage failed, for error surfaces that name the stage.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileRead(_) => "file-read",
            Self::ModelCall(_) => "model-call",
            Self::Normalize(NormalizeError::Shape(_)) => "shape",
            Self::Normalize(_) => "normalization",
            Self::AttemptInFlight => "busy",
            Self::Superseded => "superseded",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileRead(msg) => write!(f, "failed to read the file: {msg}"),
            Self::ModelCall(msg) => write!(f, "model call failed: {msg}"),
            Self::Normalize(err) => write!(f, "{err}"),
            Self::AttemptInFlight => write!(f, "a parse attempt is already in flight"),
            Self::Superseded => {
                write!(f, "the attempt was superseded before its reply arrived")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<NormalizeError> for ParseError {
    fn from(err: NormalizeError) -> Self {
        ParseError::Normalize(err)
    }
}
