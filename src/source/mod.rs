//! Data source abstraction for the six dashboard datasets.
//!
//! A [`DashboardSource`] knows how to fetch one raw JSON payload per
//! [`Dataset`]. The typed accessors (`stock_indices()`, `time_labels()`, ...)
//! are provided on top of that single operation and only check the payload's
//! top-level shape; individual metric fields are coerced later, so a
//! malformed number never fails a fetch.

mod error;
mod file;
mod http;
mod mock;

pub use error::FetchError;
pub use file::FileSource;
pub use http::{HttpSource, HttpSourceBuilder};
pub use mock::MockSource;

use std::fmt::{self, Debug};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::data::{Label, MarketOverview, MetricGroup};

/// The six datasets that make up a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    StockIndices,
    CryptoIndices,
    InterestRates,
    DailyMetrics,
    MarketOverview,
    TimeLabels,
}

impl Dataset {
    /// All datasets, in display order.
    pub const ALL: [Dataset; 6] = [
        Dataset::StockIndices,
        Dataset::CryptoIndices,
        Dataset::InterestRates,
        Dataset::DailyMetrics,
        Dataset::MarketOverview,
        Dataset::TimeLabels,
    ];

    /// Endpoint path relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Dataset::StockIndices => "/stockindices",
            Dataset::CryptoIndices => "/cryptoindices",
            Dataset::InterestRates => "/interestrates",
            Dataset::DailyMetrics => "/dailymetrics",
            Dataset::MarketOverview => "/marketoverview",
            Dataset::TimeLabels => "/timelabels",
        }
    }

    /// Short machine name (the endpoint without its slash).
    pub fn name(&self) -> &'static str {
        &self.endpoint()[1..]
    }

    /// Human-readable name for messages.
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::StockIndices => "stock indices",
            Dataset::CryptoIndices => "crypto indices",
            Dataset::InterestRates => "interest rates",
            Dataset::DailyMetrics => "daily metrics",
            Dataset::MarketOverview => "market overview",
            Dataset::TimeLabels => "time labels",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trait for fetching dashboard datasets from various backends.
///
/// Implementations provide [`fetch`](DashboardSource::fetch); the per-dataset
/// accessors decode its result. Every call is independent and may be issued
/// concurrently with the others.
///
/// # Example
///
/// ```
/// use findash::{DashboardSource, MockSource};
///
/// # tokio_test::block_on(async {
/// let source = MockSource::new();
/// let labels = source.time_labels().await.unwrap();
/// assert_eq!(labels.len(), 6);
/// # });
/// ```
#[async_trait]
pub trait DashboardSource: Send + Sync + Debug {
    /// Fetch the raw JSON payload for one dataset.
    async fn fetch(&self, dataset: Dataset) -> Result<Value, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    async fn stock_indices(&self) -> Result<MetricGroup, FetchError> {
        decode_object(Dataset::StockIndices, self.fetch(Dataset::StockIndices).await?)
    }

    async fn crypto_indices(&self) -> Result<MetricGroup, FetchError> {
        decode_object(Dataset::CryptoIndices, self.fetch(Dataset::CryptoIndices).await?)
    }

    async fn interest_rates(&self) -> Result<MetricGroup, FetchError> {
        decode_object(Dataset::InterestRates, self.fetch(Dataset::InterestRates).await?)
    }

    async fn daily_metrics(&self) -> Result<MetricGroup, FetchError> {
        decode_object(Dataset::DailyMetrics, self.fetch(Dataset::DailyMetrics).await?)
    }

    async fn market_overview(&self) -> Result<MarketOverview, FetchError> {
        decode_object(Dataset::MarketOverview, self.fetch(Dataset::MarketOverview).await?)
    }

    async fn time_labels(&self) -> Result<Vec<Label>, FetchError> {
        decode_labels(self.fetch(Dataset::TimeLabels).await?)
    }
}

/// Decode a payload whose top level must be a JSON object.
fn decode_object<T: DeserializeOwned>(dataset: Dataset, value: Value) -> Result<T, FetchError> {
    if !value.is_object() {
        return Err(FetchError::parse(
            dataset,
            format!("expected a JSON object, got {}", kind_of(&value)),
        ));
    }
    serde_json::from_value(value).map_err(|e| FetchError::parse(dataset, e.to_string()))
}

/// Decode the time labels payload: a JSON array of display strings.
///
/// Numeric labels are stringified; any other non-string entry becomes an
/// empty label so positions stay aligned with the history.
fn decode_labels(value: Value) -> Result<Vec<Label>, FetchError> {
    let Value::Array(items) = value else {
        return Err(FetchError::parse(
            Dataset::TimeLabels,
            format!("expected a JSON array, got {}", kind_of(&value)),
        ));
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
        .collect())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
