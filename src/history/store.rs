//! Recent-query history transforms.
//!
//! Every function here is pure: the input history is borrowed immutably and a
//! new history is returned, so anyone holding a previous version keeps seeing
//! exactly what they had.

use crate::models::{History, QueryRecord};
use chrono::Utc;

/// Default maximum number of recent queries to keep.
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Options for [`add_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddEntryOptions {
    /// Maximum number of records kept; older records are dropped first.
    pub max_entries: usize,
}

impl AddEntryOptions {
    /// Creates options with the given history limit.
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

impl Default for AddEntryOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Adds a query to the history, stamped with the current time.
///
/// See [`add_entry_at`] for the exact merge rules.
///
/// # Example
///
/// ```
/// use search_session::history::{add_entry, recent_queries, AddEntryOptions};
///
/// let history = add_entry(&[], "  rust ownership ", AddEntryOptions::default());
/// let history = add_entry(&history, "borrowing", AddEntryOptions::default());
/// assert_eq!(recent_queries(&history), vec!["borrowing", "rust ownership"]);
/// ```
pub fn add_entry(history: &[QueryRecord], query: &str, options: AddEntryOptions) -> History {
    add_entry_at(history, query, options, Utc::now().timestamp_millis())
}

/// Adds a query to the history at an explicit time.
///
/// - The query is trimmed; a blank query leaves the history unchanged.
/// - If the most recent record has the same text, it is replaced by a record
///   with the new timestamp (same position, same length).
/// - Otherwise a new record is prepended.
/// - The result is truncated to `options.max_entries`, dropping the oldest.
///
/// # Arguments
///
/// * `history` - Current history, most recent first
/// * `query` - Raw query text
/// * `options` - History limit
/// * `now_ms` - Timestamp for the new or refreshed record, in milliseconds
///
/// # Returns
///
/// A new history satisfying the size and adjacent-dedup invariants.
pub fn add_entry_at(
    history: &[QueryRecord],
    query: &str,
    options: AddEntryOptions,
    now_ms: i64,
) -> History {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return history.to_vec();
    }

    let record = QueryRecord::new(trimmed, now_ms);
    let rest = match history.first() {
        Some(first) if first.query == trimmed => &history[1..],
        _ => history,
    };

    std::iter::once(record)
        .chain(rest.iter().cloned())
        .take(options.max_entries)
        .collect()
}

/// Returns the query strings of a history, most recent first.
pub fn recent_queries(history: &[QueryRecord]) -> Vec<String> {
    history.iter().map(|record| record.query.clone()).collect()
}

/// Rebuilds a history obtained elsewhere so that it satisfies the invariants.
///
/// Blank queries are dropped, queries are trimmed, adjacent duplicates are
/// collapsed into the first (most recent) record, and the result is truncated
/// to `options.max_entries`.
pub fn normalize(history: &[QueryRecord], options: AddEntryOptions) -> History {
    let mut normalized: History = Vec::with_capacity(history.len().min(options.max_entries));

    for record in history {
        if normalized.len() >= options.max_entries {
            break;
        }

        let trimmed = record.query.trim();
        if trimmed.is_empty() {
            continue;
        }

        if normalized.last().is_some_and(|last| last.query == trimmed) {
            continue;
        }

        normalized.push(QueryRecord::new(trimmed, record.timestamp));
    }

    normalized
}
