use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// No fenced block and no bracket/brace literal anywhere in the reply.
    NoStructuredData,
    /// A candidate span was found but is not valid JSON.
    Malformed(String),
    /// Input was neither a string nor an already-structured value.
    UnsupportedShape(String),
    /// Valid JSON, but not an array of row objects (or a single row object).
    Shape(String),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStructuredData => write!(f, "no structured data located in model reply"),
            Self::Malformed(msg) => write!(f, "structured data malformed: {msg}"),
            Self::UnsupportedShape(kind) => write!(f, "unsupported input shape: {kind}"),
            Self::Shape(msg) => write!(f, "parsed data is not a table: {msg}"),
        }
    }
}

impl std::error::Error for NormalizeError {}
