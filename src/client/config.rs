//! Search client configuration.
//!
//! This module defines the settings that control how search requests are
//! sent: where the backend lives, how long to wait, and what to ask for.

use crate::config::{get_config, ConfigError, SessionConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Configuration for the search client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend.
    pub base_url: String,

    /// Path of the search endpoint.
    pub search_path: String,

    /// Path of the history persistence endpoint.
    pub history_path: String,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Result count used by [`crate::client::SearchClient::search_default`].
    pub default_top_k: usize,

    /// Headers sent with every request.
    pub default_headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with all other settings at
    /// their defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::from(&SessionConfig::default())
        }
    }

    /// Creates a ClientConfig from the global configuration.
    pub fn from_global_config() -> Self {
        Self::from(&get_config())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Resolves the search endpoint URL.
    pub fn search_url(&self) -> Result<Url, ConfigError> {
        self.endpoint(&self.search_path)
    }

    /// Resolves the history endpoint URL.
    pub fn history_url(&self) -> Result<Url, ConfigError> {
        self.endpoint(&self.history_path)
    }

    // Url::join would drop a base path segment without a trailing slash, so
    // the path is appended to the base instead.
    fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }
}

impl Default for ClientConfig {
    /// Creates a default ClientConfig using the global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}

impl From<&SessionConfig> for ClientConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            search_path: config.search_path.clone(),
            history_path: config.history_path.clone(),
            timeout_ms: config.timeout,
            default_top_k: config.top_k,
            default_headers: config.default_headers.clone(),
        }
    }
}
