//! Remote persistence for recent-query history.
//!
//! The history store backend is optional. When it is available, recent
//! queries are loaded from `GET /api/search/history` and each submitted query
//! is recorded with `POST /api/search/history`.

use crate::client::{read_success_body, ClientConfig, SearchClient, SearchError};
use crate::config::ConfigError;
use crate::models::{History, NewHistoryEntry, QueryRecord};
use async_trait::async_trait;
use log::trace;
use url::Url;

/// A store that can load and record recent queries.
#[async_trait]
pub trait HistoryPersistence: Send + Sync {
    /// Loads the stored history, most recent first.
    async fn fetch(&self) -> Result<History, SearchError>;

    /// Records a submitted query and returns the stored record.
    async fn record(&self, query: &str) -> Result<QueryRecord, SearchError>;
}

/// HTTP client for the history endpoint.
#[derive(Debug, Clone)]
pub struct RemoteHistory {
    http: reqwest::Client,
    history_url: Url,
}

impl RemoteHistory {
    /// Builds a history client with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the history URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = SearchClient::new(config.clone())?;
        Self::with_client(&client)
    }

    /// Builds a history client sharing the connection pool of `client`.
    pub fn with_client(client: &SearchClient) -> Result<Self, ConfigError> {
        Ok(Self {
            http: client.http().clone(),
            history_url: client.config().history_url()?,
        })
    }
}

#[async_trait]
impl HistoryPersistence for RemoteHistory {
    async fn fetch(&self) -> Result<History, SearchError> {
        trace!("GET {}", self.history_url);
        let response = self.http.get(self.history_url.clone()).send().await?;
        let bytes = read_success_body(response).await?;

        serde_json::from_slice::<History>(&bytes)
            .map_err(|e| SearchError::decode(format!("Failed to parse search history: {}", e)))
    }

    async fn record(&self, query: &str) -> Result<QueryRecord, SearchError> {
        trace!("POST {}", self.history_url);
        let body = NewHistoryEntry {
            query: query.to_string(),
        };
        let response = self
            .http
            .post(self.history_url.clone())
            .json(&body)
            .send()
            .await?;
        let bytes = read_success_body(response).await?;

        serde_json::from_slice::<QueryRecord>(&bytes)
            .map_err(|e| SearchError::decode(format!("Failed to parse history entry: {}", e)))
    }
}
