//! Raw dashboard datasets as received from a source.
//!
//! Numeric fields are kept as raw JSON values: payloads are not trusted to be
//! clean, and coercion happens per field when the view model is built. A
//! malformed field therefore degrades one value, never the whole dataset.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::series::Label;
use crate::source::Dataset;

/// A named quantity with a current value, a period-over-period change, and a
/// historical series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    #[serde(default)]
    pub current: Value,
    #[serde(default)]
    pub previous: Value,
    #[serde(default)]
    pub change: Value,
    #[serde(default, deserialize_with = "lenient")]
    pub history: Vec<Value>,
    /// Display title; falls back to the metric's key when absent.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// An ordered group of metrics keyed by name (e.g. `nasdaq`, `sp500`).
///
/// Order follows the payload, which is the order cards are displayed in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricGroup(Vec<(String, MetricSnapshot)>);

impl MetricGroup {
    pub fn new(entries: Vec<(String, MetricSnapshot)>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[(String, MetricSnapshot)] {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&MetricSnapshot> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, m)| m)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for MetricGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let entries = map
            .into_iter()
            .map(|(key, value)| {
                serde_json::from_value::<MetricSnapshot>(value)
                    .map(|metric| (key.clone(), metric))
                    .map_err(|e| D::Error::custom(format!("metric '{}': {}", key, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(entries))
    }
}

impl Serialize for MetricGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, metric) in &self.0 {
            map.serialize_entry(key, metric)?;
        }
        map.end()
    }
}

/// One row of the top gainers/losers tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketMover {
    #[serde(default, deserialize_with = "lenient")]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub change: Value,
}

/// Share of bullish/neutral/bearish sentiment, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    #[serde(default)]
    pub bullish: Value,
    #[serde(default)]
    pub neutral: Value,
    #[serde(default)]
    pub bearish: Value,
}

/// Market overview: top movers and overall sentiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    #[serde(default, deserialize_with = "lenient_rows")]
    pub top_gainers: Vec<MarketMover>,
    #[serde(default, deserialize_with = "lenient_rows")]
    pub top_losers: Vec<MarketMover>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_sentiment: MarketSentiment,
}

/// Deserialize any JSON value, falling back to the default when it does not
/// have the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize a list of rows, dropping entries that are not objects.
fn lenient_rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect())
}

/// The aggregate of all six datasets for one fetch cycle.
///
/// Only exists once every dataset has arrived; see [`SnapshotParts`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub stock_indices: MetricGroup,
    pub crypto_indices: MetricGroup,
    pub interest_rates: MetricGroup,
    pub daily_metrics: MetricGroup,
    pub market_overview: MarketOverview,
    pub time_labels: Vec<Label>,
}

/// Datasets collected during a fetch cycle, each optional until it arrives.
#[derive(Debug, Clone, Default)]
pub struct SnapshotParts {
    pub stock_indices: Option<MetricGroup>,
    pub crypto_indices: Option<MetricGroup>,
    pub interest_rates: Option<MetricGroup>,
    pub daily_metrics: Option<MetricGroup>,
    pub market_overview: Option<MarketOverview>,
    pub time_labels: Option<Vec<Label>>,
}

impl SnapshotParts {
    /// Datasets that have not arrived yet.
    pub fn missing(&self) -> Vec<Dataset> {
        let present = [
            self.stock_indices.is_some(),
            self.crypto_indices.is_some(),
            self.interest_rates.is_some(),
            self.daily_metrics.is_some(),
            self.market_overview.is_some(),
            self.time_labels.is_some(),
        ];
        Dataset::ALL
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(dataset, _)| *dataset)
            .collect()
    }

    /// Assemble the full snapshot, or `None` if any dataset is missing.
    pub fn complete(self) -> Option<DashboardSnapshot> {
        Some(DashboardSnapshot {
            stock_indices: self.stock_indices?,
            crypto_indices: self.crypto_indices?,
            interest_rates: self.interest_rates?,
            daily_metrics: self.daily_metrics?,
            market_overview: self.market_overview?,
            time_labels: self.time_labels?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_group_preserves_order() {
        let json = r#"{
            "nasdaq": { "current": 16789.45, "change": 0.23, "history": [1, 2], "label": "NASDAQ Composite" },
            "sp500": { "current": 5234.67, "change": 0.47, "history": [3, 4], "label": "S&P 500" },
            "dowJones": { "current": 38976.34, "change": 0.20, "history": [], "label": "Dow Jones" }
        }"#;

        let group: MetricGroup = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = group.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["nasdaq", "sp500", "dowJones"]);
        assert_eq!(group.get("sp500").unwrap().label.as_deref(), Some("S&P 500"));
    }

    #[test]
    fn test_metric_missing_fields_default_to_null() {
        let metric: MetricSnapshot = serde_json::from_value(json!({})).unwrap();
        assert_eq!(metric.current, Value::Null);
        assert!(metric.history.is_empty());
        assert!(metric.label.is_none());
    }

    #[test]
    fn test_group_rejects_non_object_metric() {
        let result = serde_json::from_value::<MetricGroup>(json!({ "nasdaq": 42 }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("metric 'nasdaq'"));
    }

    #[test]
    fn test_market_overview_is_lenient() {
        let overview: MarketOverview = serde_json::from_value(json!({
            "topGainers": [
                { "symbol": "AAPL", "name": "Apple Inc.", "price": 189.45, "change": 2.34 },
                "garbage"
            ],
            "topLosers": null,
            "marketSentiment": { "bullish": 65, "neutral": "20", "bearish": 15 }
        }))
        .unwrap();

        assert_eq!(overview.top_gainers.len(), 1);
        assert_eq!(overview.top_gainers[0].symbol, "AAPL");
        assert!(overview.top_losers.is_empty());
        assert_eq!(overview.market_sentiment.neutral, json!("20"));
    }

    #[test]
    fn test_snapshot_parts_complete_only_when_all_present() {
        let mut parts = SnapshotParts::default();
        assert_eq!(parts.missing().len(), 6);
        assert!(parts.clone().complete().is_none());

        parts.stock_indices = Some(MetricGroup::default());
        parts.crypto_indices = Some(MetricGroup::default());
        parts.interest_rates = Some(MetricGroup::default());
        parts.daily_metrics = Some(MetricGroup::default());
        parts.market_overview = Some(MarketOverview::default());
        assert_eq!(parts.missing(), vec![Dataset::TimeLabels]);
        assert!(parts.clone().complete().is_none());

        parts.time_labels = Some(vec!["Mon".to_string()]);
        assert!(parts.missing().is_empty());
        let snapshot = parts.complete().unwrap();
        assert_eq!(snapshot.time_labels, vec!["Mon"]);
    }
}
