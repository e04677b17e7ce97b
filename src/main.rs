use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use findash::config::Settings;
use findash::orchestrator::{FetchOrchestrator, FetchState};
use findash::ui::{self, Theme};
use findash::{events, App, DashboardSource, DashboardView, FileSource, HttpSource, MockSource};

#[derive(Parser, Debug)]
#[command(name = "findash")]
#[command(about = "Terminal financial dashboard for market, rate and banking metrics")]
struct Args {
    /// Use the built-in mock data (default when no other source is set)
    #[arg(short, long, conflicts_with_all = ["url", "dir"])]
    mock: bool,

    /// Fetch datasets from an API base URL (e.g., http://localhost:3000/api)
    #[arg(short, long, conflicts_with_all = ["dir"])]
    url: Option<String>,

    /// Read datasets from a directory of JSON files (stockindices.json, ...)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh automatically every N seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Load once, export the dashboard to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = merge_settings(&args, Settings::load(args.config.as_deref())?);

    init_logging(settings.log_file.as_deref(), args.export.is_some())?;

    let runtime = Runtime::new()?;
    let source = build_source(&args, &settings)?;
    info!("Using {}", source.description());
    let orchestrator = Arc::new(FetchOrchestrator::new(source));

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&runtime, &orchestrator, export_path);
    }

    run_tui(&runtime, orchestrator, settings.refresh_interval())
}

/// Apply command-line overrides on top of the loaded settings.
fn merge_settings(args: &Args, mut settings: Settings) -> Settings {
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = Some(refresh);
    }
    if args.log_file.is_some() {
        settings.log_file = args.log_file.clone();
    }
    settings
}

/// Pick the data source: explicit flags first, then settings, then mock data.
fn build_source(args: &Args, settings: &Settings) -> Result<Arc<dyn DashboardSource>> {
    if args.mock {
        return Ok(Arc::new(MockSource::new()));
    }

    let url = args.url.clone().or_else(|| {
        if args.dir.is_some() {
            None
        } else {
            settings.base_url.clone()
        }
    });
    if let Some(url) = url {
        let source = HttpSource::builder()
            .base_url(url)
            .timeout(settings.timeout())
            .build()?;
        return Ok(Arc::new(source));
    }

    match args.dir.as_ref().or(settings.data_dir.as_ref()) {
        Some(dir) => Ok(Arc::new(FileSource::new(dir))),
        None => Ok(Arc::new(MockSource::new())),
    }
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so logs go to a file when one is configured
/// and are dropped otherwise. Export mode logs to stderr.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if headless {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    Ok(())
}

/// Run the TUI until the user quits.
fn run_tui(
    runtime: &Runtime,
    orchestrator: Arc<FetchOrchestrator>,
    refresh_interval: Option<Duration>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and start the initial load
    let mut app = App::new(orchestrator, runtime.handle().clone(), Theme::auto_detect());
    app.refresh();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Option<Duration>,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        app.sync_state();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        if let Some(interval) = refresh_interval {
            if last_refresh.elapsed() >= interval {
                if !app.state.is_loading() {
                    app.refresh();
                }
                last_refresh = Instant::now();
            }
        }
    }

    Ok(())
}

/// Run one fetch cycle and write the dashboard view as JSON.
fn export_to_file(
    runtime: &Runtime,
    orchestrator: &FetchOrchestrator,
    export_path: &Path,
) -> Result<()> {
    let state = runtime.block_on(orchestrator.load_all())?;

    let snapshot = match state {
        FetchState::Ready(snapshot) => snapshot,
        FetchState::Failed(message) => anyhow::bail!(message),
        other => anyhow::bail!("Unexpected state after load: {}", other.label()),
    };

    let view = DashboardView::build(&snapshot);
    let json = serde_json::to_string_pretty(&view)?;
    std::fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    println!("Exported dashboard to: {}", export_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("findash").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_source_is_mock() {
        let args = parse(&[]);
        let source = build_source(&args, &Settings::default()).unwrap();
        assert_eq!(source.description(), "mock data");
    }

    #[test]
    fn test_cli_source_beats_settings() {
        let settings = Settings {
            base_url: Some("http://settings.local".to_string()),
            ..Default::default()
        };

        let source = build_source(&parse(&["--dir", "data"]), &settings).unwrap();
        assert_eq!(source.description(), "file: data");

        let source = build_source(&parse(&["--mock"]), &settings).unwrap();
        assert_eq!(source.description(), "mock data");

        let source = build_source(&parse(&[]), &settings).unwrap();
        assert_eq!(source.description(), "http: http://settings.local");
    }

    #[test]
    fn test_sources_are_exclusive() {
        let result = Args::try_parse_from(["findash", "--url", "http://x", "--dir", "d"]);
        assert!(result.is_err());
        let result = Args::try_parse_from(["findash", "--mock", "--dir", "d"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_settings() {
        let args = parse(&["--timeout", "2", "--refresh", "30"]);
        let settings = merge_settings(&args, Settings::default());
        assert_eq!(settings.timeout_secs, 2);
        assert_eq!(settings.refresh_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_export_to_file() {
        let runtime = Runtime::new().unwrap();
        let orchestrator = FetchOrchestrator::new(Arc::new(MockSource::new()));
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        export_to_file(&runtime, &orchestrator, &path).unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported["sections"].as_array().unwrap().len(), 4);
        assert_eq!(exported["time_labels"][5], "Today");
    }
}
