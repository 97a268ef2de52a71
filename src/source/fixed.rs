//! In-memory data source.

use async_trait::async_trait;
use ecobee_adapters::AdapterError;
use ecobee_types::{Selection, Thermostat};
use parking_lot::RwLock;

use super::ThermostatSource;

/// A data source serving a fixed list of thermostats, or a fixed failure.
///
/// The contents can be swapped between fetches with [`StaticSource::replace`]
/// and [`StaticSource::fail`].
#[derive(Debug)]
pub struct StaticSource {
    state: RwLock<Result<Vec<Thermostat>, String>>,
}

impl StaticSource {
    /// A source that always returns these thermostats.
    pub fn new(thermostats: Vec<Thermostat>) -> Self {
        Self {
            state: RwLock::new(Ok(thermostats)),
        }
    }

    /// A source whose every fetch fails with a connection error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(Err(message.into())),
        }
    }

    /// Serve these thermostats from now on.
    pub fn replace(&self, thermostats: Vec<Thermostat>) {
        *self.state.write() = Ok(thermostats);
    }

    /// Fail every fetch from now on.
    pub fn fail(&self, message: impl Into<String>) {
        *self.state.write() = Err(message.into());
    }
}

#[async_trait]
impl ThermostatSource for StaticSource {
    async fn fetch(&self, _selection: &Selection) -> Result<Vec<Thermostat>, AdapterError> {
        self.state
            .read()
            .clone()
            .map_err(AdapterError::Connection)
    }

    fn description(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_and_fail() {
        let source = StaticSource::new(vec![Thermostat::builder("1", "A").build()]);
        let selection = Selection::registered();

        assert_eq!(source.fetch(&selection).await.unwrap().len(), 1);

        source.replace(Vec::new());
        assert!(source.fetch(&selection).await.unwrap().is_empty());

        source.fail("offline");
        match source.fetch(&selection).await {
            Err(AdapterError::Connection(msg)) => assert_eq!(msg, "offline"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unavailable() {
        let source = StaticSource::unavailable("no route to host");
        assert!(source.fetch(&Selection::registered()).await.is_err());
        assert_eq!(source.description(), "static");
    }
}
