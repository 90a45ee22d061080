//! Error types for segment playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Requested segment index does not exist
    #[error("Index {index} out of bounds (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
