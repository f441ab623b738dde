//! Formatting utilities for recent-query lists.
//!
//! This module turns history records into human-readable lines for a
//! "recent searches" list: the query text followed by when it was run.

use crate::models::QueryRecord;
use chrono::{DateTime, Local, Utc};

/// Text shown when there is no history to display.
pub const EMPTY_HISTORY_MESSAGE: &str = "No recent searches yet.";

/// Formats a list of history records, one line per record.
///
/// Each record is formatted as "query (timestamp)". An empty history yields
/// a single [`EMPTY_HISTORY_MESSAGE`] line.
///
/// # Example
///
/// ```
/// use search_session::history::format_recent_list;
///
/// assert_eq!(format_recent_list(&[]), vec!["No recent searches yet."]);
/// ```
pub fn format_recent_list(history: &[QueryRecord]) -> Vec<String> {
    if history.is_empty() {
        return vec![EMPTY_HISTORY_MESSAGE.to_string()];
    }

    history.iter().map(format_recent_entry).collect()
}

/// Formats a single record as "query (YYYY-MM-DD HH:MM:SS)" in local time.
pub fn format_recent_entry(record: &QueryRecord) -> String {
    format!("{} ({})", record.query, format_timestamp(&record.datetime()))
}

/// Formats a single record as "query (relative time)".
pub fn format_recent_entry_relative(record: &QueryRecord) -> String {
    format!(
        "{} ({})",
        record.query,
        format_relative_time(&record.datetime(), &Utc::now())
    )
}

/// Formats a UTC timestamp in local time as "YYYY-MM-DD HH:MM:SS".
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let local_time: DateTime<Local> = timestamp.with_timezone(&Local);
    local_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Formats how long before `now` a timestamp was (e.g. "2 hours ago").
///
/// Timestamps in the future are reported as "just now".
pub fn format_relative_time(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        plural(duration.num_minutes(), "minute")
    } else if duration.num_hours() < 24 {
        plural(duration.num_hours(), "hour")
    } else if duration.num_days() == 1 {
        "yesterday".to_string()
    } else if duration.num_days() < 7 {
        format!("{} days ago", duration.num_days())
    } else if duration.num_days() < 30 {
        plural(duration.num_weeks(), "week")
    } else if duration.num_days() < 365 {
        plural(duration.num_days() / 30, "month")
    } else {
        plural(duration.num_days() / 365, "year")
    }
}

fn plural(count: i64, unit: &str) -> String {
    format!("{} {}{} ago", count, unit, if count == 1 { "" } else { "s" })
}
