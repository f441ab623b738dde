//! Observable session state.

use crate::models::SearchResult;

/// Phase of the query state machine, derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet.
    Idle,
    /// The newest submission is awaiting its response.
    Loading,
    /// The newest submission produced results.
    Success,
    /// The newest submission failed.
    Error,
}

/// Snapshot of a search session as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// The most recently submitted (trimmed) query.
    pub query: String,

    /// Results of the latest successful search. Kept across failed
    /// re-searches so the last good results stay visible.
    pub results: Option<Vec<SearchResult>>,

    /// Whether the newest submission is still in flight.
    pub loading: bool,

    /// Message of the newest submission's failure, if it failed.
    pub error: Option<String>,

    /// Generation of the newest submission. Written only by the controller.
    pub generation: u64,
}

impl SessionState {
    /// Derives the current phase.
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.results.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// Returns the displayed results, or an empty slice if there are none.
    pub fn results(&self) -> &[SearchResult] {
        self.results.as_deref().unwrap_or_default()
    }

    /// True when a completed search returned zero results and there is no
    /// error to show.
    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.error.is_none() && self.results().is_empty() && self.results.is_some()
    }
}
