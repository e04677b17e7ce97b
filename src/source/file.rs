//! File-based data source.
//!
//! Reads each dataset from `{dir}/{name}.json`, e.g. `data/stockindices.json`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use super::{DashboardSource, Dataset, FetchError};

/// A data source that reads dataset payloads from a directory of JSON files.
///
/// Files are re-read on every fetch, so a refresh picks up edits made
/// while the dashboard is running.
#[derive(Debug)]
pub struct FileSource {
    dir: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("file: {}", dir.display());
        Self { dir, description }
    }

    /// Returns the directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding a dataset.
    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(format!("{}.json", dataset.name()))
    }
}

#[async_trait]
impl DashboardSource for FileSource {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, FetchError> {
        let path = self.path_for(dataset);
        debug!("Reading {}", path.display());

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            error!("Error reading {}: {}", path.display(), e);
            FetchError::from(e)
        })?;

        serde_json::from_str(&content).map_err(|e| FetchError::parse(dataset, e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
