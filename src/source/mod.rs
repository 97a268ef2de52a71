//! Data source abstraction for fetching thermostats.
//!
//! The collector only ever talks to a [`ThermostatSource`]. Implementations
//! cover the live ecobee API, a saved API response on disk, and a fixed
//! in-memory list.

mod file;
mod fixed;

pub use file::FileSource;
pub use fixed::StaticSource;

use std::fmt::Debug;

use async_trait::async_trait;
use ecobee_adapters::ecobee::EcobeeAdapter;
use ecobee_adapters::AdapterError;
use ecobee_types::{Selection, Thermostat};

/// Trait for fetching thermostats from various sources.
///
/// # Example
///
/// ```
/// use ecobee_exporter::{StaticSource, ThermostatSource};
/// use ecobee_types::{Selection, Thermostat};
///
/// # tokio_test::block_on(async {
/// let source = StaticSource::new(vec![Thermostat::builder("1", "Hallway").build()]);
/// let thermostats = source.fetch(&Selection::registered()).await.unwrap();
/// assert_eq!(thermostats.len(), 1);
/// # });
/// ```
#[async_trait]
pub trait ThermostatSource: Send + Sync + Debug {
    /// Fetch every thermostat matching the selection.
    async fn fetch(&self, selection: &Selection) -> Result<Vec<Thermostat>, AdapterError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

#[async_trait]
impl ThermostatSource for EcobeeAdapter {
    async fn fetch(&self, selection: &Selection) -> Result<Vec<Thermostat>, AdapterError> {
        self.fetch_thermostats(selection).await
    }

    fn description(&self) -> &str {
        self.endpoint()
    }
}
