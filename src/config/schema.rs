//! Configuration schema for search sessions.
//!
//! This module defines the configuration structure and validation logic for all
//! user-configurable settings of the search client and session controller.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Largest `topK` the search backend accepts.
pub const MAX_TOP_K: usize = 50;

/// Main configuration structure for search sessions.
///
/// All settings can be configured under the "search-session" key of a settings
/// object. Missing settings fall back to sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Base URL of the search backend, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the search endpoint, relative to `base_url`.
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Path of the history persistence endpoint, relative to `base_url`.
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Request timeout in milliseconds.
    ///
    /// Covers connection, headers and body download. Defaults to 30000ms.
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Number of results requested per search. Defaults to 5.
    ///
    /// Must be between 1 and [`MAX_TOP_K`].
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum number of recent queries kept in history. Defaults to 10.
    ///
    /// Must be > 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Whether submitted queries are also recorded with the history endpoint.
    #[serde(default)]
    pub persist_history: bool,

    /// Headers sent with every request.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            history_path: default_history_path(),
            timeout: default_timeout(),
            top_k: default_top_k(),
            history_limit: default_history_limit(),
            persist_history: false,
            default_headers: default_headers(),
        }
    }
}

impl SessionConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err(ConfigError::Validation)`
    /// describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "baseUrl must not be empty".to_string(),
            ));
        }

        if self.timeout == 0 {
            return Err(ConfigError::Validation(
                "timeout must be greater than 0".to_string(),
            ));
        }

        if self.top_k == 0 || self.top_k > MAX_TOP_K {
            return Err(ConfigError::Validation(format!(
                "topK must be between 1 and {}",
                MAX_TOP_K
            )));
        }

        if self.history_limit == 0 {
            return Err(ConfigError::Validation(
                "historyLimit must be greater than 0".to_string(),
            ));
        }

        for path in [&self.search_path, &self.history_path] {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "endpoint path '{}' must start with '/'",
                    path
                )));
            }
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Merges this configuration with another, using values from `other`.
    ///
    /// Default headers are combined, with `other` winning on conflicts.
    pub fn merge(&self, other: &SessionConfig) -> Self {
        let mut default_headers = self.default_headers.clone();
        default_headers.extend(other.default_headers.clone());

        Self {
            base_url: other.base_url.clone(),
            search_path: other.search_path.clone(),
            history_path: other.history_path.clone(),
            timeout: other.timeout,
            top_k: other.top_k,
            history_limit: other.history_limit,
            persist_history: other.persist_history,
            default_headers,
        }
    }
}

// Default value functions for serde

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_search_path() -> String {
    "/api/search".to_string()
}

fn default_history_path() -> String {
    "/api/search/history".to_string()
}

fn default_timeout() -> u64 {
    30000
}

fn default_top_k() -> usize {
    crate::models::DEFAULT_TOP_K
}

fn default_history_limit() -> usize {
    crate::history::DEFAULT_MAX_ENTRIES
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("search-session/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
