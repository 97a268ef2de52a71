//! File-based data source.
//!
//! Reads a saved `GET /1/thermostat` response from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ecobee_adapters::AdapterError;
use ecobee_types::{Selection, Thermostat, ThermostatResponse};
use tracing::debug;

use super::ThermostatSource;

/// A data source that reads thermostats from a JSON file.
///
/// The file holds a thermostat response body as the API returns it
/// (`{"thermostatList": [...]}`). It is re-read on every fetch, so edits show
/// up on the next scrape. The selection is ignored.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ThermostatSource for FileSource {
    async fn fetch(&self, _selection: &Selection) -> Result<Vec<Thermostat>, AdapterError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let response: ThermostatResponse = serde_json::from_str(&content)?;

        if !response.status.is_ok() {
            return Err(AdapterError::Api {
                code: response.status.code,
                message: response.status.message,
            });
        }

        debug!(
            path = %self.path.display(),
            count = response.thermostat_list.len(),
            "read thermostats from file"
        );
        Ok(response.thermostat_list)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
