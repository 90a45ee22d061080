//! Types for oEmbed requests and responses.

use serde::{Deserialize, Serialize};

/// Default oEmbed provider
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Page URL the provider is asked about
pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Configuration for the oEmbed client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OEmbedConfig {
    /// Provider base URL; `/oembed` is appended
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl OEmbedConfig {
    /// Create a config for a different provider (or a test server).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for OEmbedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// oEmbed response. Only `title` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OEmbedResponse {
    pub title: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}
