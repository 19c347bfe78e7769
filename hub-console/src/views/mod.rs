//! View controllers
//!
//! Each view owns one piece of screen state and moves it through
//! `Idle -> Loading -> Loaded | Failed`. Failures raise an alert and clear
//! the rows; they are never returned to the caller. Every fetch is tagged
//! with a generation number and a response that is no longer the latest
//! is dropped.

mod calculate;
mod dealer;
mod editor;
mod lifecycle;
mod list;
mod product;
mod roles;
mod scoped;

pub use calculate::{CalculationInput, DiscountCalculateView};
pub use dealer::DealerDetailView;
pub use editor::{DiscountEditor, FormOptions};
pub use lifecycle::{ExpiredDiscountsView, UpcomingDiscountsView};
pub use list::{DiscountListView, ListQuery};
pub use product::ProductDetailView;
pub use roles::RoleListView;
pub use scoped::{DealerDiscountsView, DealerQuery, ProductDiscountsView, ProductQuery};

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use hub_client::http::HttpClient;
use hub_client::{ApiClient, ClientResult};
use shared::error::{AppError, AppResult, ErrorCode};
use tokio::sync::RwLock;

use crate::alert::Alerts;

/// Screen state of a view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(AppError),
}

impl<T> ViewState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// What happened to a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// State now holds the response
    Loaded,
    /// An alert was raised and the state cleared
    Failed,
    /// A newer fetch started while this one was in flight
    Stale,
    /// The request was cancelled by its owner
    Cancelled,
    /// Nothing to fetch (no previous query, input too short, ...)
    Skipped,
}

impl FetchOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }
}

/// API client and alert queue shared by all views
#[derive(Debug, Clone)]
pub struct ViewContext<H> {
    pub api: ApiClient<H>,
    pub alerts: Alerts,
}

impl<H: HttpClient> ViewContext<H> {
    pub fn new(api: ApiClient<H>, alerts: Alerts) -> Self {
        Self { api, alerts }
    }

    /// Run a mutation; announce success or raise its error
    pub(crate) async fn mutate<Fut>(&self, success: impl Into<String>, op: Fut) -> bool
    where
        Fut: Future<Output = ClientResult<()>>,
    {
        match op.await {
            Ok(()) => {
                self.alerts.success(success);
                true
            }
            Err(err) => {
                self.alerts.error(&AppError::from(err));
                false
            }
        }
    }
}

/// State slot with a stale-response guard
#[derive(Debug)]
pub struct ViewCell<T> {
    name: &'static str,
    state: RwLock<ViewState<T>>,
    generation: AtomicU64,
    alerts: Alerts,
}

impl<T: Clone> ViewCell<T> {
    pub fn new(name: &'static str, alerts: Alerts) -> Self {
        Self {
            name,
            state: RwLock::new(ViewState::Idle),
            generation: AtomicU64::new(0),
            alerts,
        }
    }

    /// Drive `fetch` and store its result unless a newer fetch superseded it
    pub async fn run<Fut>(&self, fetch: Fut) -> FetchOutcome
    where
        Fut: Future<Output = AppResult<T>>,
    {
        self.run_then(fetch, || {}).await
    }

    /// Like [`run`](Self::run); `commit` is called under the state lock
    /// only when the response is stored
    pub async fn run_then<Fut>(&self, fetch: Fut, commit: impl FnOnce()) -> FetchOutcome
    where
        Fut: Future<Output = AppResult<T>>,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().await = ViewState::Loading;

        let result = fetch.await;

        // Compare under the write lock so a newer fetch cannot slip in between
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(view = self.name, generation, "Dropping stale response");
            return FetchOutcome::Stale;
        }
        commit();

        match result {
            Ok(value) => {
                *state = ViewState::Loaded(value);
                FetchOutcome::Loaded
            }
            Err(err) if err.code == ErrorCode::RequestCancelled => {
                *state = ViewState::Idle;
                FetchOutcome::Cancelled
            }
            Err(err) => {
                self.alerts.error(&err);
                *state = ViewState::Failed(err);
                FetchOutcome::Failed
            }
        }
    }

    /// Record a failure that never reached the backend
    pub async fn fail(&self, err: AppError) -> FetchOutcome {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.alerts.error(&err);
        *self.state.write().await = ViewState::Failed(err);
        FetchOutcome::Failed
    }

    /// Back to `Idle`; in-flight fetches become stale
    pub async fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = ViewState::Idle;
    }

    /// Edit the loaded value in place; returns `None` when nothing is loaded
    pub async fn update_loaded<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        match &mut *self.state.write().await {
            ViewState::Loaded(value) => Some(f(value)),
            _ => None,
        }
    }

    pub async fn state(&self) -> ViewState<T> {
        self.state.read().await.clone()
    }

    pub async fn loaded(&self) -> Option<T> {
        self.state.read().await.loaded().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_loaded_and_failed() {
        let alerts = Alerts::new();
        let cell: ViewCell<Vec<i64>> = ViewCell::new("test", alerts.clone());

        assert_eq!(cell.run(async { Ok(vec![1, 2]) }).await, FetchOutcome::Loaded);
        assert_eq!(cell.loaded().await, Some(vec![1, 2]));

        let outcome = cell
            .run(async { Err(AppError::with_message(ErrorCode::NetworkError, "offline")) })
            .await;
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(cell.loaded().await.is_none());
        assert_eq!(cell.state().await.error().unwrap().message, "offline");
        assert_eq!(alerts.drain()[0].message, "offline");
    }

    #[tokio::test]
    async fn test_cancelled_does_not_alert() {
        let alerts = Alerts::new();
        let cell: ViewCell<i64> = ViewCell::new("test", alerts.clone());
        let outcome = cell.run(async { Err(AppError::cancelled()) }).await;
        assert_eq!(outcome, FetchOutcome::Cancelled);
        assert_eq!(cell.state().await, ViewState::Idle);
        assert!(alerts.drain().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        let cell: Arc<ViewCell<&'static str>> = Arc::new(ViewCell::new("test", Alerts::new()));
        let (release_slow, slow_gate) = oneshot::channel::<()>();

        let slow = {
            let cell = cell.clone();
            tokio::spawn(async move {
                cell.run(async move {
                    let _ = slow_gate.await;
                    Ok("slow")
                })
                .await
            })
        };
        // Let the slow fetch start before the fast one
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(cell.run(async { Ok("fast") }).await, FetchOutcome::Loaded);
        release_slow.send(()).unwrap();

        assert_eq!(slow.await.unwrap(), FetchOutcome::Stale);
        assert_eq!(cell.loaded().await, Some("fast"));
    }

    #[tokio::test]
    async fn test_commit_skipped_for_stale_response() {
        let cell: Arc<ViewCell<&'static str>> = Arc::new(ViewCell::new("test", Alerts::new()));
        let committed = Arc::new(std::sync::Mutex::new(Vec::new()));
        let (release_slow, slow_gate) = oneshot::channel::<()>();

        let slow = {
            let cell = cell.clone();
            let committed = committed.clone();
            tokio::spawn(async move {
                let fetch = async move {
                    let _ = slow_gate.await;
                    Ok("slow")
                };
                cell.run_then(fetch, || committed.lock().unwrap().push("slow"))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let outcome = cell
            .run_then(async { Ok("fast") }, || committed.lock().unwrap().push("fast"))
            .await;
        assert_eq!(outcome, FetchOutcome::Loaded);
        release_slow.send(()).unwrap();

        assert_eq!(slow.await.unwrap(), FetchOutcome::Stale);
        assert_eq!(*committed.lock().unwrap(), vec!["fast"]);
    }

    #[tokio::test]
    async fn test_update_loaded() {
        let cell: ViewCell<Vec<i64>> = ViewCell::new("test", Alerts::new());
        assert!(cell.update_loaded(|v| v.push(1)).await.is_none());
        cell.run(async { Ok(vec![1, 2, 3]) }).await;
        cell.update_loaded(|v| v.retain(|x| *x != 2)).await;
        assert_eq!(cell.loaded().await, Some(vec![1, 3]));
    }
}
