/// CLI error types
use thiserror::Error;
use utawaku_core::{CoreError, ValidationError};
use utawaku_playback::PlaybackError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Position {0} does not exist (positions start at 1)")]
    InvalidPosition(usize),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid segment: {0}")]
    Validation(#[from] ValidationError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
