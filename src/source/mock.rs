//! Static mock data source.
//!
//! Serves a fixed set of datasets compiled into the binary. This is the
//! default source and what the dashboard shows without any backend.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{DashboardSource, Dataset, FetchError};

/// Mock datasets keyed by dataset name (`stockindices`, `timelabels`, ...).
const MOCK_DATA: &str = include_str!("mock_data.json");

/// A data source that serves the built-in mock datasets.
///
/// # Example
///
/// ```
/// use findash::{DashboardSource, Dataset, MockSource};
///
/// # tokio_test::block_on(async {
/// let source = MockSource::new();
/// let payload = source.fetch(Dataset::StockIndices).await.unwrap();
/// assert!(payload.get("nasdaq").is_some());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockSource {
    description: String,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            description: "mock data".to_string(),
        }
    }
}

#[async_trait]
impl DashboardSource for MockSource {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, FetchError> {
        debug!("Serving mock {}", dataset);
        let mut data: Value =
            serde_json::from_str(MOCK_DATA).map_err(|e| FetchError::parse(dataset, e.to_string()))?;

        data.get_mut(dataset.name())
            .map(Value::take)
            .ok_or_else(|| FetchError::parse(dataset, "dataset missing from mock data"))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_serves_every_dataset() {
        let source = MockSource::new();
        for dataset in Dataset::ALL {
            let payload = source.fetch(dataset).await.unwrap();
            assert!(!payload.is_null(), "{dataset} missing");
        }
        assert_eq!(source.description(), "mock data");
    }

    #[tokio::test]
    async fn test_mock_source_typed_accessors() {
        let source = MockSource::new();

        let stocks = source.stock_indices().await.unwrap();
        let keys: Vec<&str> = stocks.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["nasdaq", "sp500", "dowJones", "russell2000"]);

        let labels = source.time_labels().await.unwrap();
        assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Today"]);

        let overview = source.market_overview().await.unwrap();
        assert_eq!(overview.top_losers[0].symbol, "META");
    }
}
