//! Recent-query data models.
//!
//! This module defines the records kept in the recent-query history and the
//! wire shapes used by the history persistence endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single submitted query.
///
/// Records are immutable once created: the history store replaces records
/// instead of editing them in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryRecord {
    /// The trimmed query text as submitted by the user.
    pub query: String,

    /// Submission time in milliseconds since the Unix epoch.
    ///
    /// Deserialization also accepts an RFC 3339 datetime string, which is
    /// what the history store backend emits.
    #[serde(deserialize_with = "deserialize_timestamp_millis")]
    pub timestamp: i64,
}

impl QueryRecord {
    /// Creates a record for `query` at the given time.
    ///
    /// # Arguments
    ///
    /// * `query` - Query text, expected to be trimmed already
    /// * `timestamp` - Milliseconds since the Unix epoch
    pub fn new(query: impl Into<String>, timestamp: i64) -> Self {
        Self {
            query: query.into(),
            timestamp,
        }
    }

    /// Creates a record for `query` stamped with the current time.
    pub fn now(query: impl Into<String>) -> Self {
        Self::new(query, Utc::now().timestamp_millis())
    }

    /// Returns the submission time as a UTC datetime.
    ///
    /// Out-of-range timestamps fall back to the Unix epoch.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }
}

/// Ordered recent-query history, most recent first.
///
/// Invariants maintained by [`crate::history::add_entry`]:
/// - length never exceeds the configured maximum
/// - no two adjacent records carry the same query text
pub type History = Vec<QueryRecord>;

/// Body of `POST /api/search/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHistoryEntry {
    /// Query text to record.
    pub query: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

fn deserialize_timestamp_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Ok(ms),
        RawTimestamp::Float(ms) => Ok(ms as i64),
        RawTimestamp::Text(text) => parse_timestamp_text(&text).map_err(serde::de::Error::custom),
    }
}

fn parse_timestamp_text(text: &str) -> Result<i64, String> {
    if let Ok(ms) = text.trim().parse::<i64>() {
        return Ok(ms);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.timestamp_millis());
    }

    // Naive datetimes (no offset) are treated as UTC.
    chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().timestamp_millis())
        .map_err(|e| format!("invalid timestamp '{}': {}", text, e))
}
