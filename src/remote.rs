//! # Remote Semantic Search Module
//!
//! ## Purpose
//! The slow, higher-quality search collaborator. The orchestrator only knows
//! the `RemoteSearch` trait; the HTTP implementation lives here so tests can
//! substitute scripted fakes.
//!
//! ## Input/Output Specification
//! - **Input**: Raw query text, locale
//! - **Output**: Ranked `SearchResult` list, or `RemoteUnavailable`
//! - **Failure**: Timeouts, connection errors, and non-success statuses all
//!   surface as recoverable `RemoteUnavailable` errors

use crate::config::RemoteConfig;
use crate::errors::{DiscoveryError, Result};
use crate::{Locale, SearchResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote semantic search collaborator.
///
/// Implementations must be cancel-safe: the orchestrator drops in-flight
/// futures when a newer query supersedes them.
#[async_trait]
pub trait RemoteSearch: Send + Sync {
    /// Run a semantic search for the raw query text.
    async fn search(&self, query: &str, locale: Locale) -> Result<Vec<SearchResult>>;
}

#[derive(Debug, Serialize)]
struct RemoteRequest<'a> {
    query: &'a str,
    locale: Locale,
}

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    results: Vec<SearchResult>,
}

/// HTTP client for the remote semantic search service
pub struct HttpRemoteSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemoteSearch {
    /// Build the client from remote configuration. The request timeout is
    /// baked into the client so every call inherits it.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DiscoveryError::Internal {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl RemoteSearch for HttpRemoteSearch {
    async fn search(&self, query: &str, locale: Locale) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RemoteRequest { query, locale })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::RemoteUnavailable {
                details: format!("semantic search returned status {}", status),
            });
        }

        let body: RemoteResponse = response.json().await?;
        tracing::debug!(results = body.results.len(), "remote search completed");
        Ok(body.results)
    }
}

/// Remote search that is configured off. Always reports unavailable so the
/// orchestrator settles on local results.
pub struct DisabledRemoteSearch;

#[async_trait]
impl RemoteSearch for DisabledRemoteSearch {
    async fn search(&self, _query: &str, _locale: Locale) -> Result<Vec<SearchResult>> {
        Err(DiscoveryError::RemoteUnavailable {
            details: "remote search disabled by configuration".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResultSource;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn remote_config(endpoint: String, timeout_ms: u64) -> RemoteConfig {
        RemoteConfig {
            enabled: true,
            endpoint,
            timeout_ms,
        }
    }

    #[tokio::test]
    async fn parses_ranked_results_from_response() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "results": [
                {
                    "document_id": "vehicle-bill-of-sale",
                    "title": "Vehicle Bill of Sale",
                    "description": "Document the sale of a vehicle",
                    "confidence": 0.93,
                    "source": "semantic",
                    "category": "Finance",
                    "tags": ["finance"]
                }
            ]
        });
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_json(serde_json::json!({
                "query": "buying a used car",
                "locale": "en"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let remote =
            HttpRemoteSearch::new(&remote_config(format!("{}/search", server.uri()), 5000))
                .unwrap();
        let results = remote.search("buying a used car", Locale::En).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document_id, "vehicle-bill-of-sale");
        assert_eq!(results[0].source, ResultSource::Semantic);
    }

    #[tokio::test]
    async fn server_error_maps_to_remote_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let remote =
            HttpRemoteSearch::new(&remote_config(format!("{}/search", server.uri()), 5000))
                .unwrap();
        let err = remote.search("lease", Locale::En).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::RemoteUnavailable { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn malformed_body_maps_to_remote_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let remote =
            HttpRemoteSearch::new(&remote_config(format!("{}/search", server.uri()), 5000))
                .unwrap();
        let err = remote.search("lease", Locale::En).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::RemoteUnavailable { .. }));
    }

    #[tokio::test]
    async fn timeout_maps_to_remote_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "results": [] }))
                    .set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let remote =
            HttpRemoteSearch::new(&remote_config(format!("{}/search", server.uri()), 50)).unwrap();
        let err = remote.search("lease", Locale::En).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::RemoteUnavailable { .. }));
    }

    #[tokio::test]
    async fn disabled_remote_always_reports_unavailable() {
        let err = DisabledRemoteSearch
            .search("lease", Locale::En)
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::RemoteUnavailable { .. }));
    }
}
