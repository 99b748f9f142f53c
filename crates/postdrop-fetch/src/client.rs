//! Remote API HTTP client.

use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use postdrop_config::SourceConfig;
use postdrop_core::FetchedPayload;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Where an invocation's payload comes from.
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Retrieve the whole resource in one request.
    async fn fetch(&self) -> FetchResult<FetchedPayload>;
}

/// Client for the configured JSON endpoint.
#[derive(Clone)]
pub struct SourceClient {
    client: Client,
    url: String,
    timeout: Option<Duration>,
}

impl SourceClient {
    /// Create a new client from configuration.
    pub fn from_config(config: &SourceConfig) -> FetchResult<Self> {
        Self::build(&config.url, config.timeout_seconds.map(Duration::from_secs))
    }

    /// Create a client for `url` with no request timeout.
    pub fn new(url: impl Into<String>) -> FetchResult<Self> {
        Self::build(&url.into(), None)
    }

    fn build(url: &str, timeout: Option<Duration>) -> FetchResult<Self> {
        if url.trim().is_empty() {
            return Err(FetchError::InvalidConfig("source url is empty".to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Http)?;

        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
        })
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_connect() {
            FetchError::Connection {
                url: self.url.clone(),
                source: e,
            }
        } else if e.is_timeout() {
            FetchError::Timeout {
                seconds: self.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else {
            FetchError::Http(e)
        }
    }
}

#[async_trait]
impl PayloadSource for SourceClient {
    async fn fetch(&self) -> FetchResult<FetchedPayload> {
        debug!("Fetching {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        let content: serde_json::Value = serde_json::from_slice(&bytes)?;
        debug!("Fetched {} bytes from {}", bytes.len(), self.url);

        Ok(FetchedPayload::new(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn client_for(server: &Server) -> SourceClient {
        SourceClient::new(server.url("/posts").to_string()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let config = SourceConfig::default();
        assert!(SourceClient::from_config(&config).is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            SourceClient::new("  "),
            Err(FetchError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_success_preserves_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/posts")).respond_with(
                status_code(200)
                    .insert_header("content-type", "application/json")
                    .body(r#"[{"id":1,"title":"a"}]"#),
            ),
        );

        let payload = client_for(&server).fetch().await.unwrap();

        assert_eq!(
            String::from_utf8(payload.to_body().unwrap()).unwrap(),
            r#"[{"id":1,"title":"a"}]"#
        );
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/posts"))
                .respond_with(status_code(503).body(r#"{"error":"down"}"#)),
        );

        let err = client_for(&server).fetch().await.unwrap_err();

        match err {
            FetchError::Api { status, message } => {
                assert_eq!(status, 503);
                assert!(message.contains("down"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/posts"))
                .respond_with(status_code(200).body("not json")),
        );

        let result = client_for(&server).fetch().await;

        assert!(matches!(result, Err(FetchError::Json(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SourceClient::new(format!("http://{}/posts", addr)).unwrap();

        assert!(matches!(
            client.fetch().await,
            Err(FetchError::Connection { .. })
        ));
    }
}
