//! Search session orchestration.
//!
//! A [`SessionController`] turns user submissions into backend searches and
//! keeps the visible state consistent with the newest one:
//!
//! - blank queries are ignored
//! - the history is updated when a query is submitted, not when it succeeds
//! - responses from superseded submissions never reach the state
//! - a failed search shows its error but keeps the previous results
//!
//! # Example
//!
//! ```no_run
//! use search_session::config::SessionConfig;
//! use search_session::session::SessionController;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = SessionController::from_config(&SessionConfig::default())?;
//!
//! controller.search("rust ownership").await;
//! for result in controller.state().results() {
//!     println!("{:.2} {}", result.score, result.document.title().unwrap_or("(untitled)"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod generation;
pub mod state;

pub use controller::{
    ApplyStatus, PendingSearch, SearchFuture, SearchOutcome, SessionController, SessionOptions,
};
pub use generation::{Generation, GenerationCounter};
pub use state::{Phase, SessionState};
