//! Fetch orchestration for a dashboard refresh cycle.
//!
//! [`FetchOrchestrator::load_all`] issues the six dataset requests together,
//! waits for every one of them to settle, and publishes exactly one of
//! [`FetchState`]'s variants at a time. Aggregation is all-or-nothing: a
//! single failed dataset fails the cycle and no partial data is kept.
//!
//! State lives in a `tokio::sync::watch` channel owned by the orchestrator.
//! The presentation layer holds receivers from [`FetchOrchestrator::subscribe`]
//! and never mutates the state itself.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::data::{DashboardSnapshot, SnapshotParts};
use crate::source::{DashboardSource, FetchError};

/// User-visible message for a failed cycle.
///
/// The underlying cause is logged, not shown: every failure collapses into
/// one retryable banner.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data. Press 'r' to retry.";

/// Current state of the dashboard data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// Nothing requested yet.
    Idle,
    /// A cycle is in flight; any previous result has been discarded.
    Loading,
    /// All six datasets arrived.
    Ready(Arc<DashboardSnapshot>),
    /// At least one dataset failed.
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The snapshot, only in the `Ready` state.
    pub fn snapshot(&self) -> Option<&Arc<DashboardSnapshot>> {
        match self {
            FetchState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Short label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            FetchState::Idle => "Idle",
            FetchState::Loading => "Loading",
            FetchState::Ready(_) => "Ready",
            FetchState::Failed(_) => "Error",
        }
    }
}

/// Errors returned by [`FetchOrchestrator::load_all`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// A cycle is already in flight; the new request was rejected.
    #[error("a dashboard load is already in progress")]
    AlreadyLoading,
}

/// Drives fetch cycles against a [`DashboardSource`] and owns the state.
#[derive(Debug)]
pub struct FetchOrchestrator {
    source: Arc<dyn DashboardSource>,
    state: watch::Sender<FetchState>,
}

impl FetchOrchestrator {
    /// Create an orchestrator in the `Idle` state.
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self { source, state }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Description of the underlying source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Run one fetch cycle.
    ///
    /// Moves to `Loading` immediately, then to `Ready` or `Failed` once all
    /// six requests have settled. Returns the final state. A call made while
    /// another cycle is in flight is rejected without touching the state.
    pub async fn load_all(&self) -> Result<FetchState, OrchestratorError> {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading() {
                false
            } else {
                *state = FetchState::Loading;
                true
            }
        });
        if !started {
            warn!("Dashboard load requested while another is in flight; ignoring");
            return Err(OrchestratorError::AlreadyLoading);
        }
        let mut guard = LoadingGuard::new(&self.state);

        info!("Loading dashboard data from {}", self.source.description());

        let source = &self.source;
        let (stocks, crypto, rates, metrics, overview, labels) = tokio::join!(
            source.stock_indices(),
            source.crypto_indices(),
            source.interest_rates(),
            source.daily_metrics(),
            source.market_overview(),
            source.time_labels(),
        );

        let mut parts = SnapshotParts::default();
        let mut failures: Vec<FetchError> = Vec::new();

        collect(stocks, &mut parts.stock_indices, &mut failures);
        collect(crypto, &mut parts.crypto_indices, &mut failures);
        collect(rates, &mut parts.interest_rates, &mut failures);
        collect(metrics, &mut parts.daily_metrics, &mut failures);
        collect(overview, &mut parts.market_overview, &mut failures);
        collect(labels, &mut parts.time_labels, &mut failures);

        let missing = parts.missing();
        let next = match parts.complete() {
            Some(snapshot) => {
                debug!(
                    stocks = snapshot.stock_indices.len(),
                    crypto = snapshot.crypto_indices.len(),
                    rates = snapshot.interest_rates.len(),
                    metrics = snapshot.daily_metrics.len(),
                    labels = snapshot.time_labels.len(),
                    "Dashboard data loaded"
                );
                FetchState::Ready(Arc::new(snapshot))
            }
            None => {
                for failure in &failures {
                    error!("Error fetching dashboard data: {}", failure);
                }
                let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
                error!(missing = %names.join(", "), "Dashboard load failed");
                FetchState::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        };

        self.state.send_replace(next.clone());
        guard.disarm();
        Ok(next)
    }
}

/// Resets a `Loading` state left behind by a cycle that never settled.
///
/// A `load_all` future dropped mid-flight (timeout, `select!`, abort, or a
/// panicking source) would otherwise leave the orchestrator rejecting every
/// later load.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<FetchState>,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a watch::Sender<FetchState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Dashboard load abandoned before settling");
            self.state
                .send_replace(FetchState::Failed(LOAD_FAILED_MESSAGE.to_string()));
        }
    }
}

fn collect<T>(result: Result<T, FetchError>, slot: &mut Option<T>, failures: &mut Vec<FetchError>) {
    match result {
        Ok(value) => *slot = Some(value),
        Err(err) => failures.push(err),
    }
}
