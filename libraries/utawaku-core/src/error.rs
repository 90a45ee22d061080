/// Core error types for Utawaku
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Utawaku
#[derive(Error, Debug)]
pub enum CoreError {
    /// A form submission was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Playlist import failed
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Time string could not be parsed
    #[error(transparent)]
    TimeParse(#[from] TimeParseError),

    /// Index outside the playlist
    #[error("Index {index} out of bounds (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an index out of bounds error
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }
}

/// Reasons a segment entry is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Not a valid video URL or id: {0:?}")]
    InvalidVideoId(String),

    #[error("Invalid {field} time: {input:?}")]
    InvalidTime { field: &'static str, input: String },

    #[error("End time ({end}s) is before start time ({start}s)")]
    EndBeforeStart { start: u32, end: u32 },
}

/// Playlist CSV import errors
///
/// Line numbers are 1-based and count the header line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("Missing videoId header")]
    MissingHeader,

    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("Line {line}: invalid {field} value {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Time string parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse time {0:?}")]
pub struct TimeParseError(pub String);
