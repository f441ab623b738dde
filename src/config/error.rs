//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading configuration or building clients from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting holds a value outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// The configured base URL or endpoint path does not form a valid URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidBaseUrl(err.to_string())
    }
}
