//! Data models for search sessions.
//!
//! This module contains the core data structures shared by the history store,
//! the search client and the session controller.

pub mod query;
pub mod result;

pub use query::{History, NewHistoryEntry, QueryRecord};
pub use result::{
    Document, DocumentId, DocumentMetadata, SearchRequest, SearchResult, DEFAULT_TOP_K,
};
