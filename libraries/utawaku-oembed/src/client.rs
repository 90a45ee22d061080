//! oEmbed title lookup client.

use crate::error::{OEmbedError, Result};
use crate::types::{OEmbedConfig, OEmbedResponse, WATCH_URL};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use utawaku_core::{extract_video_id, VideoId};

/// Something that can name a video.
///
/// The editor calls this when a segment is saved without a title. Lookups
/// never fail: an unknown title is the empty string.
#[async_trait]
pub trait TitleLookup: Send + Sync {
    async fn lookup_title(&self, video_id: &VideoId) -> String;
}

/// Client for an oEmbed provider.
///
/// # Example
///
/// ```ignore
/// use utawaku_oembed::{OEmbedClient, OEmbedConfig};
///
/// let client = OEmbedClient::new(OEmbedConfig::default())?;
/// let title = client.fetch_title("dQw4w9WgXcQ").await;
/// println!("{title}");
/// ```
#[derive(Debug, Clone)]
pub struct OEmbedClient {
    http: Client,
    endpoint: Url,
}

impl OEmbedClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OEmbedConfig) -> Result<Self> {
        let base = config.base_url.trim_end_matches('/');
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(OEmbedError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let endpoint = Url::parse(&format!("{base}/oembed"))
            .map_err(|e| OEmbedError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(5)))
            .user_agent(format!("Utawaku/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Fetch the full oEmbed response for a video id or share URL.
    pub async fn try_fetch(&self, video: &str) -> Result<OEmbedResponse> {
        let video_id = extract_video_id(video)
            .ok_or_else(|| OEmbedError::InvalidVideoId(video.trim().to_string()))?;
        let page = format!("{WATCH_URL}{video_id}");

        debug!(video_id = %video_id, endpoint = %self.endpoint, "Looking up title");

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("url", page.as_str()), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OEmbedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OEmbedError::Parse(e.to_string()))
    }

    /// Fetch just the title.
    pub async fn try_fetch_title(&self, video: &str) -> Result<String> {
        Ok(self.try_fetch(video).await?.title)
    }

    /// Fetch the title, or `""` on any failure.
    pub async fn fetch_title(&self, video: &str) -> String {
        match self.try_fetch_title(video).await {
            Ok(title) => title,
            Err(e) => {
                warn!(video, error = %e, "Title lookup failed");
                String::new()
            }
        }
    }
}

#[async_trait]
impl TitleLookup for OEmbedClient {
    async fn lookup_title(&self, video_id: &VideoId) -> String {
        self.fetch_title(video_id.as_str()).await
    }
}
