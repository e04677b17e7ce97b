//! Data models and processing for dashboard datasets.
//!
//! This module turns raw, untrusted payloads into a consistent display model.
//!
//! ## Submodules
//!
//! - [`normalize`]: Total numeric coercion and en-US style formatters
//! - [`series`]: Chart series assembly against time-axis labels
//! - [`metrics`]: Raw dataset models ([`MetricSnapshot`], [`DashboardSnapshot`])
//! - [`dashboard`]: Display model ([`DashboardView`], [`Card`])
//!
//! ## Data Flow
//!
//! ```text
//! DashboardSnapshot (raw JSON values)
//!        │
//!        ▼
//! DashboardView::build()
//!        │
//!        ├──▶ Card (value/change via normalize)
//!        │
//!        └──▶ series::assemble_with() (one ChartPoint per axis position)
//! ```

pub mod dashboard;
pub mod metrics;
pub mod normalize;
pub mod series;

pub use dashboard::{Card, CardKind, DashboardView, OverviewView, Section, SectionId, Tone};
pub use metrics::{
    DashboardSnapshot, MarketMover, MarketOverview, MarketSentiment, MetricGroup, MetricSnapshot,
    SnapshotParts,
};
pub use normalize::{to_number, ChangeIndicator, Direction};
pub use series::{assemble, ChartPoint, Label};
