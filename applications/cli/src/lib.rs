//! Utawaku CLI Library
//!
//! Playlist editing, CSV import/export, title lookup and a simulated
//! playback session, driven by the `utawaku` binary.
//!
//! This library exposes the command implementations for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod simulate;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use simulate::{simulate, SimulationOptions, SimulationReport};
