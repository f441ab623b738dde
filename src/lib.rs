//! Client-side core of a document search session.
//!
//! This crate sends queries to a search backend, keeps a short list of
//! recent queries, and maintains the state a search UI renders: the current
//! query, results, loading flag and error message.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Wire types for queries, documents and search results
//! - **config**: Session settings, validation and the global configuration
//! - **client**: HTTP client for the search endpoint and error normalization
//! - **history**: Bounded recent-query history, remote persistence and formatting
//! - **session**: The controller tying submissions, history and results together
//!
//! # Stale responses
//!
//! Queries can be submitted while an earlier search is still running. Every
//! submission starts a new generation, and an outcome is only applied if its
//! generation is still the newest. Earlier requests are left to finish and
//! their results are dropped.
//!
//! # Usage
//!
//! ```no_run
//! use search_session::{SessionConfig, SessionController};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig {
//!     base_url: "http://localhost:8000".to_string(),
//!     top_k: 10,
//!     ..Default::default()
//! };
//! let mut controller = SessionController::from_config(&config)?;
//!
//! let first = controller.submit("vector search").expect("non-blank query");
//! let second = controller.submit("rust ownership").expect("non-blank query");
//!
//! // The first outcome is discarded because a newer query was submitted.
//! let (a, b) = tokio::join!(first.wait(), second.wait());
//! controller.apply(b);
//! controller.apply(a);
//!
//! assert_eq!(controller.state().query, "rust ownership");
//! assert_eq!(controller.recent_queries(), vec!["rust ownership", "vector search"]);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod history;
pub mod models;
pub mod session;

pub use client::{ClientConfig, SearchBackend, SearchClient, SearchError};
pub use config::{ConfigError, SessionConfig};
pub use history::{add_entry, recent_queries, AddEntryOptions, HistoryPersistence, RemoteHistory};
pub use models::{Document, QueryRecord, SearchRequest, SearchResult};
pub use session::{
    ApplyStatus, Generation, PendingSearch, Phase, SearchOutcome, SessionController,
    SessionOptions, SessionState,
};
