//! Search session controller.
//!
//! The controller owns the session state, the recent-query history and the
//! generation counter. A submission updates state and history synchronously,
//! then hands back a [`PendingSearch`]; awaiting it yields a
//! [`SearchOutcome`] which [`SessionController::apply`] folds into the state
//! only if no newer submission happened in the meantime.

use super::generation::{Generation, GenerationCounter};
use super::state::SessionState;
use crate::client::{ClientConfig, SearchBackend, SearchClient, SearchError};
use crate::config::{get_config, ConfigError, SessionConfig};
use crate::history::{self, AddEntryOptions, HistoryPersistence, RemoteHistory};
use crate::models::{History, QueryRecord, SearchResult, DEFAULT_TOP_K};
use log::{debug, warn};
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Boxed backend call carried by a [`PendingSearch`].
pub type SearchFuture =
    Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, SearchError>> + Send + 'static>>;

/// Controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Result count requested for every search.
    pub top_k: usize,

    /// Maximum number of recent queries kept.
    pub max_history: usize,
}

impl SessionOptions {
    /// Creates SessionOptions from the global configuration.
    pub fn from_global_config() -> Self {
        Self::from(&get_config())
    }

    fn history_options(&self) -> AddEntryOptions {
        AddEntryOptions::new(self.max_history)
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_history: history::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl From<&SessionConfig> for SessionOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            top_k: config.top_k,
            max_history: config.history_limit,
        }
    }
}

/// A submitted search whose response has not been awaited yet.
///
/// Holds no borrow of the controller, so several searches can be in flight
/// while the controller keeps accepting submissions.
#[must_use = "a pending search does nothing until it is awaited and applied"]
pub struct PendingSearch {
    generation: Generation,
    query: String,
    future: SearchFuture,
}

impl PendingSearch {
    /// Generation this search was submitted under.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The trimmed query being searched.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Waits for the backend and returns the tagged outcome.
    pub async fn wait(self) -> SearchOutcome {
        let result = self.future.await;
        SearchOutcome {
            generation: self.generation,
            query: self.query,
            result,
        }
    }
}

impl fmt::Debug for PendingSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSearch")
            .field("generation", &self.generation)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

/// Result of a search, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Generation of the submission that produced this outcome.
    pub generation: Generation,

    /// The query that was searched.
    pub query: String,

    /// Backend results or the normalized failure.
    pub result: Result<Vec<SearchResult>, SearchError>,
}

/// What [`SessionController::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    /// The outcome belonged to the newest submission and updated the state.
    Applied,
    /// A newer submission superseded the outcome; state is unchanged.
    Discarded,
}

/// Single-writer owner of a search session.
pub struct SessionController<B = SearchClient> {
    backend: Arc<B>,
    persistence: Option<Arc<dyn HistoryPersistence>>,
    options: SessionOptions,
    state: SessionState,
    history: History,
    generations: GenerationCounter,
    observers: watch::Sender<SessionState>,
}

impl SessionController<SearchClient> {
    /// Builds a controller backed by a [`SearchClient`].
    ///
    /// When `persist_history` is enabled, submitted queries are also recorded
    /// with the history endpoint through a [`RemoteHistory`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid or the HTTP
    /// clients cannot be built.
    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = SearchClient::new(ClientConfig::from(config))?;
        let remote = if config.persist_history {
            Some(RemoteHistory::with_client(&client)?)
        } else {
            None
        };

        let controller = Self::new(client, SessionOptions::from(config));
        Ok(match remote {
            Some(remote) => controller.with_persistence(remote),
            None => controller,
        })
    }

    /// Builds a controller from the global configuration.
    pub fn from_global_config() -> Result<Self, ConfigError> {
        Self::from_config(&get_config())
    }
}

impl<B> SessionController<B>
where
    B: SearchBackend + 'static,
{
    /// Creates a controller with an idle state and an empty history.
    pub fn new(backend: B, options: SessionOptions) -> Self {
        let state = SessionState::default();
        let (observers, _) = watch::channel(state.clone());

        Self {
            backend: Arc::new(backend),
            persistence: None,
            options,
            state,
            history: History::new(),
            generations: GenerationCounter::new(),
            observers,
        }
    }

    /// Attaches a history store that records every submitted query.
    pub fn with_persistence(mut self, persistence: impl HistoryPersistence + 'static) -> Self {
        self.persistence = Some(Arc::new(persistence));
        self
    }

    /// Returns the search backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the controller settings.
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Returns the current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Subscribes to state snapshots, published after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.observers.subscribe()
    }

    /// Returns the recent-query history, most recent first.
    pub fn history(&self) -> &[QueryRecord] {
        &self.history
    }

    /// Returns the recent query strings, most recent first.
    pub fn recent_queries(&self) -> Vec<String> {
        history::recent_queries(&self.history)
    }

    /// Generation of the newest submission.
    pub fn current_generation(&self) -> Generation {
        self.generations.current()
    }

    /// Number of stale outcomes discarded so far.
    pub fn superseded_count(&self) -> u64 {
        self.generations.superseded_count()
    }

    /// Submits a query.
    ///
    /// A blank query is ignored and returns `None`. Otherwise, before
    /// returning, the state shows the trimmed query as loading with no error,
    /// a new generation is started, and the query is added to the history
    /// whatever the search later returns.
    ///
    /// With a history store attached, the query is recorded on the current
    /// tokio runtime right away, whether or not the pending search is ever
    /// awaited. Outside a runtime the record is skipped with a warning.
    ///
    /// The returned [`PendingSearch`] must be awaited and its outcome passed
    /// to [`apply`](Self::apply).
    pub fn submit(&mut self, raw_query: &str) -> Option<PendingSearch> {
        let trimmed = raw_query.trim();
        if trimmed.is_empty() {
            debug!("Ignoring blank query");
            return None;
        }

        let generation = self.generations.advance();
        self.state.query = trimmed.to_string();
        self.state.loading = true;
        self.state.error = None;
        self.state.generation = generation.value();
        self.history = history::add_entry(&self.history, trimmed, self.options.history_options());
        self.publish();

        debug!("Submitted query {:?} as generation {}", trimmed, generation);

        if let Some(store) = self.persistence.clone() {
            record_in_background(store, trimmed.to_string());
        }

        let backend = Arc::clone(&self.backend);
        let query = trimmed.to_string();
        let top_k = self.options.top_k;

        let future: SearchFuture = Box::pin(async move { backend.search(&query, top_k).await });

        Some(PendingSearch {
            generation,
            query: trimmed.to_string(),
            future,
        })
    }

    /// Re-submits the history record at `index` (0 is the most recent).
    ///
    /// Returns `None` if there is no record at `index`.
    pub fn select_recent(&mut self, index: usize) -> Option<PendingSearch> {
        let query = self.history.get(index)?.query.clone();
        self.submit(&query)
    }

    /// Folds a search outcome into the session state.
    ///
    /// Outcomes from superseded generations are dropped without touching the
    /// state. For the newest generation, success replaces the results and
    /// clears the error; failure sets the error and keeps the previous
    /// results. Either way loading ends.
    pub fn apply(&mut self, outcome: SearchOutcome) -> ApplyStatus {
        if !self.generations.is_current(outcome.generation) {
            self.generations.note_superseded();
            debug!(
                "Discarding stale outcome for {:?} (generation {}, current {})",
                outcome.query,
                outcome.generation,
                self.generations.current()
            );
            return ApplyStatus::Discarded;
        }

        self.state.loading = false;
        match outcome.result {
            Ok(results) => {
                debug!(
                    "Query {:?} returned {} result(s)",
                    outcome.query,
                    results.len()
                );
                self.state.results = Some(results);
                self.state.error = None;
            }
            Err(err) => {
                debug!("Query {:?} failed: {}", outcome.query, err);
                self.state.error = Some(err.message().to_string());
            }
        }
        self.publish();

        ApplyStatus::Applied
    }

    /// Submits a query, waits for it and applies the outcome.
    ///
    /// Returns `None` for a blank query.
    pub async fn search(&mut self, raw_query: &str) -> Option<ApplyStatus> {
        let pending = self.submit(raw_query)?;
        let outcome = pending.wait().await;
        Some(self.apply(outcome))
    }

    /// Replaces the history with one loaded elsewhere.
    ///
    /// The records are normalized: trimmed, blanks dropped, adjacent
    /// duplicates merged and the size limit applied.
    pub fn replace_history(&mut self, history: &[QueryRecord]) {
        self.history = history::normalize(history, self.options.history_options());
    }

    /// Loads the stored history from the attached history store.
    ///
    /// Queries submitted in this session before the load stay on top of the
    /// stored ones, and stored records of those same queries are dropped.
    /// Without a history store this is a no-op.
    ///
    /// # Returns
    ///
    /// The number of records in the history afterwards.
    ///
    /// # Errors
    ///
    /// Returns the store's `SearchError`; the local history is left as is.
    pub async fn restore_history(&mut self) -> Result<usize, SearchError> {
        let Some(store) = self.persistence.clone() else {
            return Ok(self.history.len());
        };

        let stored = store.fetch().await?;
        let stored_count = stored.len();

        // Session queries were already recorded, so the store holds copies.
        let local: HashSet<&str> = self.history.iter().map(|r| r.query.as_str()).collect();
        let merged: History = self
            .history
            .iter()
            .cloned()
            .chain(
                stored
                    .into_iter()
                    .filter(|record| !local.contains(record.query.trim())),
            )
            .collect();

        self.history = history::normalize(&merged, self.options.history_options());
        debug!("Restored {} stored history record(s)", stored_count);
        Ok(self.history.len())
    }

    fn publish(&self) {
        self.observers.send_replace(self.state.clone());
    }
}

fn record_in_background(store: Arc<dyn HistoryPersistence>, query: String) {
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                if let Err(e) = store.record(&query).await {
                    warn!("Failed to record {:?} in search history: {}", query, e);
                }
            });
        }
        Err(_) => {
            warn!(
                "No tokio runtime available, {:?} was not recorded in search history",
                query
            );
        }
    }
}

impl<B> fmt::Debug for SessionController<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("history", &self.history)
            .field("generations", &self.generations)
            .field("persistent", &self.persistence.is_some())
            .finish_non_exhaustive()
    }
}
