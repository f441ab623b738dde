//! Search endpoint client.
//!
//! [`SearchClient`] performs one request/response exchange with the search
//! backend using reqwest and normalizes every failure into [`SearchError`].
//! The [`SearchBackend`] trait is the seam the session controller depends on,
//! so controllers can be driven by something other than a live HTTP backend.

pub mod config;
pub mod error;

pub use config::ClientConfig;
pub use error::SearchError;

use crate::config::ConfigError;
use crate::models::{SearchRequest, SearchResult};
use async_trait::async_trait;
use log::trace;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Anything that can answer a search query.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Runs `query` and returns up to `top_k` results in backend order.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, SearchError>;
}

/// HTTP client for `POST /api/search`.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    search_url: Url,
    config: ClientConfig,
}

impl SearchClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the endpoint URL is invalid, a default header
    /// is malformed, or the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let search_url = config.search_url()?;
        let http = build_http_client(&config)?;

        Ok(Self {
            http,
            search_url,
            config,
        })
    }

    /// Builds a client from the global configuration.
    pub fn from_global_config() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_global_config())
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying reqwest client, for collaborators that talk to
    /// the same backend.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Sends a search request and decodes the ranked results.
    ///
    /// The query is sent as-is; callers trim and validate it. `top_k` is
    /// forwarded to the backend and never applied client-side, and results are
    /// returned in the order the backend sent them.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] for a non-2xx status
    /// - [`SearchError::Transport`] when no response arrives
    /// - [`SearchError::Decode`] when a 2xx body is not a result list
    ///
    /// # Example
    ///
    /// ```no_run
    /// use search_session::client::{ClientConfig, SearchClient};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = SearchClient::new(ClientConfig::new("http://localhost:8000"))?;
    /// let results = client.search("rust ownership", 5).await?;
    /// for result in results {
    ///     println!("{:.3} {:?}", result.score, result.document.title());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let body = SearchRequest::new(query, top_k);
        trace!("POST {} top_k={}", self.search_url, top_k);

        let response = self
            .http
            .post(self.search_url.clone())
            .json(&body)
            .send()
            .await?;

        let bytes = read_success_body(response).await?;
        serde_json::from_slice::<Vec<SearchResult>>(&bytes)
            .map_err(|e| SearchError::decode(format!("Failed to parse search response: {}", e)))
    }

    /// Sends a search request using the configured default result count.
    pub async fn search_default(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        self.search(query, self.config.default_top_k).await
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, SearchError> {
        SearchClient::search(self, query, top_k).await
    }
}

/// Reads the body of a response, turning non-2xx statuses into
/// [`SearchError::Http`].
pub(crate) async fn read_success_body(
    response: reqwest::Response,
) -> Result<Vec<u8>, SearchError> {
    let status = response.status();

    if !status.is_success() {
        // An unreadable error body still yields the generic status message.
        let text = response.text().await.unwrap_or_default();
        return Err(SearchError::from_status(status.as_u16(), &text));
    }

    Ok(response.bytes().await?.to_vec())
}

fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, ConfigError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.default_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::Validation(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ConfigError::Validation(format!("invalid header value for '{}': {}", name, e)))?;
        headers.insert(name, value);
    }

    reqwest::Client::builder()
        .timeout(config.timeout_duration())
        .default_headers(headers)
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}
