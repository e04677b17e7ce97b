//! Application state and navigation logic.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::data::{DashboardView, SectionId};
use crate::orchestrator::{FetchOrchestrator, FetchState};
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Stocks,
    Crypto,
    Rates,
    Banking,
    /// Gainers, losers and sentiment.
    Overview,
}

impl View {
    /// All views, in tab order.
    pub const ALL: [View; 5] = [
        View::Stocks,
        View::Crypto,
        View::Rates,
        View::Banking,
        View::Overview,
    ];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Position in the tab bar.
    pub fn index(self) -> usize {
        match self {
            View::Stocks => 0,
            View::Crypto => 1,
            View::Rates => 2,
            View::Banking => 3,
            View::Overview => 4,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Stocks => "Stocks",
            View::Crypto => "Crypto",
            View::Rates => "Rates",
            View::Banking => "Banking",
            View::Overview => "Overview",
        }
    }

    /// The card section shown by this view, if it is a card view.
    pub fn section(&self) -> Option<SectionId> {
        match self {
            View::Stocks => Some(SectionId::Stocks),
            View::Crypto => Some(SectionId::Crypto),
            View::Rates => Some(SectionId::Rates),
            View::Banking => Some(SectionId::Banking),
            View::Overview => None,
        }
    }
}

/// Main application state.
///
/// The app never fetches on its own thread: [`App::refresh`] spawns a cycle
/// onto the runtime and [`App::sync_state`] picks up whatever the
/// orchestrator has published since the last frame.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data
    orchestrator: Arc<FetchOrchestrator>,
    runtime: Handle,
    state_rx: watch::Receiver<FetchState>,
    pub state: FetchState,
    pub dashboard: Option<DashboardView>,
    pub last_updated: Option<DateTime<Local>>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App driving the given orchestrator on `runtime`.
    pub fn new(orchestrator: Arc<FetchOrchestrator>, runtime: Handle, theme: Theme) -> Self {
        let state_rx = orchestrator.subscribe();
        let state = state_rx.borrow().clone();
        let mut app = Self {
            running: true,
            current_view: View::Stocks,
            show_help: false,
            orchestrator,
            runtime,
            state_rx,
            state: FetchState::Idle,
            dashboard: None,
            last_updated: None,
            theme,
            status_message: None,
        };
        app.apply_state(state);
        app
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.orchestrator.source_description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Start a fetch cycle in the background.
    ///
    /// Returns false when a cycle is already in flight.
    pub fn refresh(&mut self) -> bool {
        if self.orchestrator.state().is_loading() {
            self.set_status_message("Already loading".to_string());
            return false;
        }

        let orchestrator = Arc::clone(&self.orchestrator);
        self.runtime.spawn(async move {
            if let Err(e) = orchestrator.load_all().await {
                debug!("Refresh skipped: {}", e);
            }
        });
        true
    }

    /// Pick up the latest published state.
    ///
    /// Returns true if the state changed since the last call.
    pub fn sync_state(&mut self) -> bool {
        if !self.state_rx.has_changed().unwrap_or(false) {
            return false;
        }
        let state = self.state_rx.borrow_and_update().clone();
        self.apply_state(state);
        true
    }

    fn apply_state(&mut self, state: FetchState) {
        // Charts are only ever built from a complete snapshot
        self.dashboard = state.snapshot().map(|snapshot| DashboardView::build(snapshot));
        if self.dashboard.is_some() {
            self.last_updated = Some(Local::now());
        }
        self.state = state;
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current dashboard view to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref dashboard) = self.dashboard else {
            anyhow::bail!("No data to export");
        };

        let json = serde_json::to_string_pretty(dashboard)?;
        std::fs::write(path, json)?;

        info!("Exported dashboard to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DashboardSource, Dataset, FetchError, MockSource};
    use async_trait::async_trait;
    use serde_json::Value;

    #[derive(Debug)]
    struct BrokenSource;

    #[async_trait]
    impl DashboardSource for BrokenSource {
        async fn fetch(&self, dataset: Dataset) -> Result<Value, FetchError> {
            Err(FetchError::Status {
                dataset,
                status: 500,
            })
        }

        fn description(&self) -> &str {
            "broken"
        }
    }

    fn app_with(source: Arc<dyn DashboardSource>) -> (App, Arc<FetchOrchestrator>) {
        let orchestrator = Arc::new(FetchOrchestrator::new(source));
        let app = App::new(Arc::clone(&orchestrator), Handle::current(), Theme::dark());
        (app, orchestrator)
    }

    async fn settle(orchestrator: &FetchOrchestrator) {
        let mut rx = orchestrator.subscribe();
        rx.wait_for(|s| matches!(s, FetchState::Ready(_) | FetchState::Failed(_)))
            .await
            .unwrap();
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Stocks.next(), View::Crypto);
        assert_eq!(View::Overview.next(), View::Stocks);
        assert_eq!(View::Stocks.prev(), View::Overview);
        assert_eq!(View::Banking.section(), Some(SectionId::Banking));
        assert_eq!(View::Overview.section(), None);
        for view in View::ALL {
            assert_eq!(View::ALL[view.index()], view);
        }
    }

    #[tokio::test]
    async fn test_new_app_is_idle() {
        let (app, _) = app_with(Arc::new(MockSource::new()));
        assert_eq!(app.state, FetchState::Idle);
        assert!(app.dashboard.is_none());
        assert_eq!(app.source_description(), "mock data");
    }

    #[tokio::test]
    async fn test_refresh_builds_dashboard() {
        let (mut app, orchestrator) = app_with(Arc::new(MockSource::new()));

        assert!(app.refresh());
        settle(&orchestrator).await;

        assert!(app.sync_state());
        let dashboard = app.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.sections.len(), 4);
        assert_eq!(dashboard.overview.gainers.len(), 3);
        assert!(app.last_updated.is_some());

        // Nothing new since the last sync
        assert!(!app.sync_state());
    }

    #[tokio::test]
    async fn test_failed_refresh_has_no_dashboard() {
        let (mut app, orchestrator) = app_with(Arc::new(BrokenSource));

        app.refresh();
        settle(&orchestrator).await;
        app.sync_state();

        assert!(matches!(app.state, FetchState::Failed(_)));
        assert!(app.dashboard.is_none());
        assert!(app.export_state(Path::new("unused.json")).is_err());
    }

    #[tokio::test]
    async fn test_export_state_writes_view() {
        let (mut app, orchestrator) = app_with(Arc::new(MockSource::new()));
        app.refresh();
        settle(&orchestrator).await;
        app.sync_state();

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let exported: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported["sections"][0]["title"], "Stock Indices");
        assert_eq!(exported["overview"]["sentiment"]["bullish"], "65%");
    }

    #[test]
    fn test_status_message() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let orchestrator = Arc::new(FetchOrchestrator::new(Arc::new(MockSource::new())));
        let mut app = App::new(orchestrator, runtime.handle().clone(), Theme::dark());

        assert!(app.get_status_message().is_none());
        app.set_status_message("hello".to_string());
        assert_eq!(app.get_status_message(), Some("hello"));
    }
}
