//! Debounced, cancellable place search
//!
//! Each call to [`SuggestionSearch::set_query`] starts a new request id and
//! aborts the task of the previous one. The task waits for the quiet period,
//! queries the geocoder and commits its result only if its id is still the
//! latest. Superseded or aborted requests never touch visible state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::PlaceSuggestion;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::GeocodingPort;

/// Search pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_suggestion_limit() -> u8 {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl SearchConfig {
    /// Quiet period as a duration
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Lifecycle of the current search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "request_id", rename_all = "snake_case")]
pub enum SearchState {
    /// No query
    #[default]
    Idle,
    /// Waiting for the debounce or the geocoder
    Pending(u64),
    /// Results of this request are visible
    Fulfilled(u64),
    /// This request was cancelled before completing
    Aborted(u64),
}

/// Visible search state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub state: SearchState,
    /// Query the state belongs to
    pub query: String,
    pub suggestions: Vec<PlaceSuggestion>,
    pub loading: bool,
}

impl SearchSnapshot {
    /// Whether a completed search matched nothing
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self.state, SearchState::Fulfilled(_)) && self.suggestions.is_empty()
    }
}

#[derive(Debug, Default)]
struct Inflight {
    request_id: u64,
    task: Option<JoinHandle<()>>,
}

struct Shared {
    geocoding: Arc<dyn GeocodingPort>,
    inflight: Mutex<Inflight>,
    snapshot: watch::Sender<SearchSnapshot>,
}

/// Debounced suggestion pipeline
pub struct SuggestionSearch {
    shared: Arc<Shared>,
    config: SearchConfig,
}

impl fmt::Debug for SuggestionSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionSearch")
            .field("config", &self.config)
            .field("request_id", &self.shared.inflight.lock().request_id)
            .finish_non_exhaustive()
    }
}

impl SuggestionSearch {
    /// Create an idle search pipeline
    pub fn new(geocoding: Arc<dyn GeocodingPort>, config: SearchConfig) -> Self {
        let (snapshot, _) = watch::channel(SearchSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                geocoding,
                inflight: Mutex::new(Inflight::default()),
                snapshot,
            }),
            config,
        }
    }

    /// Update the query
    ///
    /// Must be called from within a Tokio runtime. Returns the new request id.
    pub fn set_query(&self, query: &str) -> u64 {
        let mut inflight = self.shared.inflight.lock();
        let previous = inflight.request_id;
        inflight.request_id += 1;
        let request_id = inflight.request_id;

        if let Some(task) = inflight.task.take() {
            if !task.is_finished() {
                task.abort();
                debug!(request_id = previous, "Aborted superseded search");
                self.shared
                    .snapshot
                    .send_modify(|s| s.state = SearchState::Aborted(previous));
            }
        }

        let trimmed = query.trim().to_string();
        if trimmed.is_empty() {
            self.shared.snapshot.send_replace(SearchSnapshot::default());
            return request_id;
        }

        self.shared.snapshot.send_modify(|s| {
            s.state = SearchState::Pending(request_id);
            s.query.clone_from(&trimmed);
            s.loading = true;
        });

        let shared = Arc::clone(&self.shared);
        let debounce = self.config.debounce();
        let limit = self.config.suggestion_limit;
        inflight.task = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = shared.geocoding.search_places(&trimmed, limit).await;

            let inflight = shared.inflight.lock();
            if inflight.request_id != request_id {
                debug!(request_id, "Discarding stale search result");
                return;
            }
            let suggestions = result.unwrap_or_else(|e| {
                warn!(error = %e, "Suggestion search failed");
                Vec::new()
            });
            debug!(request_id, count = suggestions.len(), "Search fulfilled");
            shared.snapshot.send_modify(|s| {
                s.state = SearchState::Fulfilled(request_id);
                s.suggestions = suggestions;
                s.loading = false;
            });
            drop(inflight);
        }));

        request_id
    }

    /// Current visible state
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.snapshot.subscribe()
    }

    /// Wait until no request is pending and return the state
    pub async fn settled(&self) -> SearchSnapshot {
        let mut rx = self.subscribe();
        let result = rx
            .wait_for(|s| !matches!(s.state, SearchState::Pending(_)))
            .await
            .map(|s| SearchSnapshot::clone(&s));
        result.unwrap_or_else(|_| self.snapshot())
    }

    /// Cancel any in-flight request
    ///
    /// A request that had not completed is reported as aborted.
    pub fn shutdown(&self) {
        let mut inflight = self.shared.inflight.lock();
        let previous = inflight.request_id;
        inflight.request_id += 1;
        if let Some(task) = inflight.task.take() {
            if !task.is_finished() {
                task.abort();
                self.shared.snapshot.send_modify(|s| {
                    s.state = SearchState::Aborted(previous);
                    s.loading = false;
                });
            }
        }
    }
}

impl Drop for SuggestionSearch {
    fn drop(&mut self) {
        self.shutdown();
    }
}
