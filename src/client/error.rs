//! Search request error types.
//!
//! Every failure of a search exchange is normalized into [`SearchError`],
//! whose display form is the bare human-readable message shown to the user.

use serde::Deserialize;
use thiserror::Error;

/// Maximum number of characters of a raw error body carried into a message.
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors that can occur while talking to the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No response was received: connection failure, timeout, or the body
    /// could not be read.
    #[error("{message}")]
    Transport {
        /// Description of the underlying cause.
        message: String,
    },

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Best-effort message extracted from the response body.
        message: String,
    },

    /// The backend answered 2xx but the body was not the expected shape.
    #[error("{message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

impl SearchError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        SearchError::Transport {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        SearchError::Decode {
            message: message.into(),
        }
    }

    /// Builds an HTTP error from a non-2xx status and its raw body.
    ///
    /// The message is chosen in this order:
    /// 1. a `detail` string (or the joined `msg` fields of a `detail` list),
    ///    or a `message` string, from a JSON body
    /// 2. the raw body text, prefixed with the generic status message
    /// 3. the generic status message alone
    pub fn from_status(status: u16, body: &str) -> Self {
        SearchError::Http {
            status,
            message: extract_error_message(status, body),
        }
    }

    /// Returns the HTTP status code, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Http { status, .. } => Some(*status),
            SearchError::Transport { .. } | SearchError::Decode { .. } => None,
        }
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        match self {
            SearchError::Transport { message }
            | SearchError::Http { message, .. }
            | SearchError::Decode { message } => message,
        }
    }
}

/// Convert reqwest errors to SearchError.
///
/// Any error surfaced by reqwest means no usable response arrived, so all of
/// them map to [`SearchError::Transport`].
impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::transport(format!("Search request timed out: {}", err))
        } else if err.is_connect() {
            SearchError::transport(format!("Connection failed: {}", err))
        } else {
            SearchError::transport(err.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Items(Vec<DetailItem>),
}

#[derive(Deserialize)]
struct DetailItem {
    msg: String,
}

fn generic_message(status: u16) -> String {
    format!("Search request failed with status {}", status)
}

fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let detail = match parsed.detail {
            Some(Detail::Text(text)) => Some(text),
            Some(Detail::Items(items)) if !items.is_empty() => Some(
                items
                    .into_iter()
                    .map(|item| item.msg)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        };

        if let Some(message) = detail.or(parsed.message) {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }

    let text = body.trim();
    if text.is_empty() {
        return generic_message(status);
    }

    let snippet: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{}: {}", generic_message(status), snippet)
}
