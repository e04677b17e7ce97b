//! # findash
//!
//! A terminal financial dashboard and library: stock indices, crypto
//! indices, interest rates and banking metrics as cards with line charts,
//! plus a market overview of top movers and sentiment.
//!
//! The library part is the data pipeline. It fetches six datasets
//! concurrently, coerces every untrusted number, and assembles chart series
//! against a shared time axis. The binary renders the result with ratatui.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────────┐    ┌──────────┐             │
//! │  │  app    │───▶│     data     │───▶│    ui    │──▶ Terminal │
//! │  │ (state) │    │ (normalize,  │    │(render)  │             │
//! │  └────┬────┘    │  series,     │    └──────────┘             │
//! │       │         │  dashboard)  │                             │
//! │       ▼         └──────────────┘                             │
//! │  ┌──────────────┐                                            │
//! │  │ orchestrator │◀── watch::Receiver<FetchState>             │
//! │  └──────┬───────┘                                            │
//! │         ▼                                                    │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── MockSource | HttpSource | FileSource         │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`DashboardSource`] trait and its implementations
//! - **[`orchestrator`]**: All-or-nothing fetch cycles and the
//!   Idle/Loading/Ready/Failed state machine
//! - **[`data`]**: Numeric coercion and formatting, series assembly, and the
//!   [`DashboardView`] display model
//! - **[`app`]**, **[`events`]**, **[`ui`]**: The TUI
//! - **[`config`]**: Layered settings
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Built-in mock data
//! findash
//!
//! # A REST backend serving /stockindices, /timelabels, ...
//! findash --url http://localhost:3000/api
//!
//! # A directory of JSON files, then export without the TUI
//! findash --dir ./data --export dashboard.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use findash::{DashboardView, FetchOrchestrator, FetchState, MockSource};
//!
//! # tokio_test::block_on(async {
//! let orchestrator = FetchOrchestrator::new(Arc::new(MockSource::new()));
//!
//! if let FetchState::Ready(snapshot) = orchestrator.load_all().await.unwrap() {
//!     let view = DashboardView::build(&snapshot);
//!     assert_eq!(view.sections.len(), 4);
//! }
//! # });
//! ```
//!
//! ### Series assembly
//!
//! ```
//! use findash::data::assemble;
//! use serde_json::json;
//!
//! let history = [json!(3.75), json!("invalid"), json!("5.22")];
//! let labels = vec!["Mon".to_string(), "Tue".to_string(), "Wed".to_string()];
//!
//! let points = assemble(&history, Some(labels.as_slice()));
//! assert_eq!(points[1].value, 0.0);
//! assert_eq!(points[2].value, 5.22);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod orchestrator;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{
    Card, CardKind, ChartPoint, DashboardSnapshot, DashboardView, MetricGroup, MetricSnapshot,
    Tone,
};
pub use orchestrator::{FetchOrchestrator, FetchState, OrchestratorError};
pub use source::{
    DashboardSource, Dataset, FetchError, FileSource, HttpSource, HttpSourceBuilder, MockSource,
};
