//! Error types for the oEmbed client.

use thiserror::Error;

/// Errors that can occur while looking up a video title.
#[derive(Error, Debug)]
pub enum OEmbedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("oEmbed service returned status {status}")]
    Status { status: u16 },

    /// Input is neither a video id nor a recognised share URL
    #[error("Invalid video id: {0}")]
    InvalidVideoId(String),

    /// Configured base URL is unusable
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type for oEmbed operations.
pub type Result<T> = std::result::Result<T, OEmbedError>;
