/// Application configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use utawaku_oembed::OEmbedConfig;
use utawaku_playback::EngineConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "utawaku.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Where the playlist is saved between runs
    #[serde(default = "default_playlist_path")]
    pub playlist_path: PathBuf,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub oembed: OEmbedConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `utawaku.toml` is read if
    /// present. `UTAWAKU_*` variables override both, with `__` between
    /// nested keys (`UTAWAKU_ENGINE__SETTLE_DELAY_MS=500`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("UTAWAKU")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playlist_path.as_os_str().is_empty() {
            return Err(CliError::Config("playlist_path cannot be empty".to_string()));
        }

        if self.engine.volume > 100 {
            return Err(CliError::Config(format!(
                "engine.volume must be 0-100, got {}",
                self.engine.volume
            )));
        }

        if !self.engine.boundary_epsilon_secs.is_finite() || self.engine.boundary_epsilon_secs < 0.0
        {
            return Err(CliError::Config(
                "engine.boundary_epsilon_secs must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

fn default_playlist_path() -> PathBuf {
    PathBuf::from("utawaku-playlist.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playlist_path: default_playlist_path(),
            engine: EngineConfig::default(),
            oembed: OEmbedConfig::default(),
        }
    }
}
