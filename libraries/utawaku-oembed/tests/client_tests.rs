//! Tests for the oEmbed client.
//!
//! These tests run against a local mock server.

use serde_json::json;
use std::time::Duration;
use utawaku_core::VideoId;
use utawaku_oembed::{OEmbedClient, OEmbedConfig, OEmbedError, TitleLookup, DEFAULT_BASE_URL};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RICK: &str = "dQw4w9WgXcQ";
const RICK_PAGE: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn client_for(server: &MockServer) -> OEmbedClient {
    OEmbedClient::new(OEmbedConfig::new(server.uri())).unwrap()
}

async fn mount_title(server: &MockServer, title: &str) {
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param("url", RICK_PAGE))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": title,
            "author_name": "Rick Astley",
            "provider_name": "YouTube",
            "type": "video"
        })))
        .mount(server)
        .await;
}

// =============================================================================
// Config and construction
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OEmbedConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = OEmbedClient::new(OEmbedConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/oembed");
    }

    #[test]
    fn test_non_http_url_rejected() {
        let result = OEmbedClient::new(OEmbedConfig::new("ftp://example.com"));
        assert!(matches!(result, Err(OEmbedError::InvalidUrl(_))));

        let result = OEmbedClient::new(OEmbedConfig::new(""));
        assert!(matches!(result, Err(OEmbedError::InvalidUrl(_))));
    }
}

// =============================================================================
// Lookups
// =============================================================================

mod lookup {
    use super::*;

    #[tokio::test]
    async fn test_fetch_title() {
        let server = MockServer::start().await;
        mount_title(&server, "Never Gonna Give You Up").await;

        let client = client_for(&server);
        assert_eq!(client.fetch_title(RICK).await, "Never Gonna Give You Up");

        let full = client.try_fetch(RICK).await.unwrap();
        assert_eq!(full.author_name.as_deref(), Some("Rick Astley"));
    }

    #[tokio::test]
    async fn test_share_url_is_normalized() {
        let server = MockServer::start().await;
        mount_title(&server, "Never Gonna Give You Up").await;

        let client = client_for(&server);
        let title = client
            .try_fetch_title("https://youtu.be/dQw4w9WgXcQ?t=42")
            .await
            .unwrap();
        assert_eq!(title, "Never Gonna Give You Up");
    }

    #[tokio::test]
    async fn test_trait_object_lookup() {
        let server = MockServer::start().await;
        mount_title(&server, "Via trait").await;

        let lookup: Box<dyn TitleLookup> = Box::new(client_for(&server));
        let id = VideoId::parse(RICK).unwrap();
        assert_eq!(lookup.lookup_title(&id).await, "Via trait");
    }
}

// =============================================================================
// Failures
// =============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_fetch_title(RICK).await.unwrap_err();
        assert!(matches!(err, OEmbedError::Status { status: 404 }));
        assert_eq!(client.fetch_title(RICK).await, "");
    }

    #[tokio::test]
    async fn test_unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "html": "<iframe>" })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_fetch_title(RICK).await.unwrap_err();
        assert!(matches!(err, OEmbedError::Parse(_)));
        assert_eq!(client.fetch_title(RICK).await, "");
    }

    #[tokio::test]
    async fn test_invalid_id_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_fetch_title("not a video").await.unwrap_err();
        assert!(matches!(err, OEmbedError::InvalidVideoId(_)));
        assert_eq!(client.fetch_title("").await, "");
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "title": "Too late" }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = OEmbedConfig {
            timeout_secs: 1,
            ..OEmbedConfig::new(server.uri())
        };
        let client = OEmbedClient::new(config).unwrap();
        let err = client.try_fetch_title(RICK).await.unwrap_err();
        assert!(matches!(err, OEmbedError::Request(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = OEmbedClient::new(OEmbedConfig {
            timeout_secs: 1,
            ..OEmbedConfig::new("http://127.0.0.1:1")
        })
        .unwrap();
        assert_eq!(client.fetch_title(RICK).await, "");
    }
}
