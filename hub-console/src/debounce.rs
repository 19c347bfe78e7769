//! Search input debouncing
//!
//! Keystrokes reset a timer; only the value still present when the timer
//! expires is searched. Inputs shorter than [`MIN_SEARCH_CHARS`] never
//! reach the backend.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period before a search fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Shortest query sent to the backend
pub const MIN_SEARCH_CHARS: usize = 2;

/// Classification of the current search box content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTrigger {
    /// Box is empty: show the unfiltered list
    Reset,
    /// Too short to search; show the hint instead
    Hint(String),
    /// Search for this (trimmed) query once the input settles
    Query(String),
}

impl SearchTrigger {
    pub fn classify(input: &str) -> Self {
        let query = input.trim();
        if query.is_empty() {
            Self::Reset
        } else if query.chars().count() < MIN_SEARCH_CHARS {
            Self::Hint(format!(
                "Type at least {} characters to search",
                MIN_SEARCH_CHARS
            ))
        } else {
            Self::Query(query.to_string())
        }
    }
}

/// Runs the most recently scheduled action after a quiet period
///
/// Scheduling again, or calling [`cancel`](Self::cancel), aborts the
/// pending action.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn replace(&self, next: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut slot = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *slot, next)
    }

    /// Run `action` after the quiet period unless superseded
    pub fn schedule<Fut>(&self, action: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });
        if let Some(previous) = self.replace(Some(handle)) {
            previous.abort();
        }
    }

    /// Drop the pending action, if any
    pub fn cancel(&self) {
        if let Some(previous) = self.replace(None) {
            previous.abort();
        }
    }

    /// Wait for the pending action to finish
    pub async fn settle(&self) {
        if let Some(handle) = self.replace(None) {
            // Aborted handles resolve with a JoinError; nothing to report
            let _ = handle.await;
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
