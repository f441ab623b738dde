//! Recent-query history.
//!
//! This module keeps a small, bounded list of the queries a user submitted so
//! they can be re-run with one click.
//!
//! # Features
//!
//! - Pure history transforms with adjacent dedup and a size limit
//! - Optional remote persistence through the history endpoint
//! - Formatting helpers for recent-search lists
//!
//! # Example
//!
//! ```
//! use search_session::history::{add_entry, recent_queries, AddEntryOptions};
//!
//! let options = AddEntryOptions::new(2);
//! let history = add_entry(&[], "rag", options);
//! let history = add_entry(&history, "llm", options);
//! let history = add_entry(&history, "vector search", options);
//!
//! assert_eq!(recent_queries(&history), vec!["vector search", "llm"]);
//! ```

pub mod remote;
pub mod store;
pub mod ui;

pub use remote::{HistoryPersistence, RemoteHistory};
pub use store::{
    add_entry, add_entry_at, normalize, recent_queries, AddEntryOptions, DEFAULT_MAX_ENTRIES,
};
pub use ui::{
    format_recent_entry, format_recent_entry_relative, format_recent_list, format_relative_time,
    format_timestamp, EMPTY_HISTORY_MESSAGE,
};
