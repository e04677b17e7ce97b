//! HTTP data source.
//!
//! Fetches each dataset from `{base_url}{endpoint}` and expects a JSON body.
//! Any non-success status fails that dataset.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use super::{DashboardSource, Dataset, FetchError};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A data source backed by the dashboard REST API.
///
/// # Example
///
/// ```no_run
/// use findash::{DashboardSource, HttpSource};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let source = HttpSource::builder()
///     .base_url("http://localhost:3000/api")
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// let rates = source.interest_rates().await.unwrap();
/// println!("{} rates", rates.len());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
    description: String,
}

impl HttpSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// The API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a dataset.
    pub fn url(&self, dataset: Dataset) -> String {
        format!("{}{}", self.base_url, dataset.endpoint())
    }
}

#[async_trait]
impl DashboardSource for HttpSource {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, FetchError> {
        let url = self.url(dataset);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Error fetching data from {}: {}", dataset.endpoint(), e);
            FetchError::from(e)
        })?;

        if !response.status().is_success() {
            error!(
                "Error fetching data from {}: status {}",
                dataset.endpoint(),
                response.status()
            );
            return Err(FetchError::Status {
                dataset,
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::parse(dataset, e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`HttpSource`].
#[derive(Debug, Default)]
pub struct HttpSourceBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpSourceBuilder {
    /// Set the API base URL (e.g., "http://localhost:3000/api").
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the source.
    pub fn build(self) -> Result<HttpSource, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| "http://localhost:3000/api".to_string())
            .trim_end_matches('/')
            .to_string();
        let description = format!("http: {}", base_url);

        Ok(HttpSource {
            client,
            base_url,
            description,
        })
    }
}
