use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Row index past the end of the row sequence.
    RowOutOfBounds { index: usize, len: usize },
    /// A row literal that is not a JSON object.
    NotAnObject(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowOutOfBounds { index, len } => {
                write!(f, "row index {index} out of bounds (table has {len} rows)")
            }
            Self::NotAnObject(found) => {
                write!(f, "expected a row object, found {found}")
            }
        }
    }
}

impl std::error::Error for TableError {}
