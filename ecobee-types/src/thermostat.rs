//! Thermostat - one device as returned by a thermostat query.

use crate::{RemoteSensor, RemoteSensorBuilder};

/// A thermostat and the nested objects requested by the selection.
///
/// Temperatures throughout are integers in tenths of a degree Fahrenheit,
/// as the API reports them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Thermostat {
    /// Thermostat serial number.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub identifier: String,

    /// User-assigned display name.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub name: String,

    /// Current runtime state.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub runtime: Runtime,

    /// Recent equipment run history.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub extended_runtime: ExtendedRuntime,

    /// Thermostat settings.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub settings: Settings,

    /// Weather forecast for the thermostat's location.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub weather: Weather,

    /// Remote sensors attached to the thermostat, including its own
    /// built-in sensor.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub remote_sensors: Vec<RemoteSensor>,
}

impl Thermostat {
    /// Create a builder for a thermostat with the given identity.
    pub fn builder(identifier: impl Into<String>, name: impl Into<String>) -> ThermostatBuilder {
        ThermostatBuilder::new(identifier, name)
    }

    /// Whether the thermostat is currently connected to the ecobee servers.
    pub fn is_connected(&self) -> bool {
        self.runtime.connected
    }

    /// The first (current) forecast entry, if the weather has any.
    pub fn current_forecast(&self) -> Option<&Forecast> {
        self.weather.forecasts.first()
    }
}

/// Current runtime state of a thermostat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Runtime {
    /// Whether the thermostat is connected to the servers.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub connected: bool,

    /// Thermostat-averaged current temperature.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub actual_temperature: i64,

    /// Heat set point: the minimum temperature to maintain.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub desired_heat: i64,

    /// Cool set point: the maximum temperature to maintain.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub desired_cool: i64,
}

/// Equipment run durations for the most recent reporting intervals.
///
/// Each field holds one sample per interval, in seconds of run time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ExtendedRuntime {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub aux_heat1: Vec<i64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub aux_heat2: Vec<i64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub aux_heat3: Vec<i64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub cool1: Vec<i64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub cool2: Vec<i64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub heat_pump1: Vec<i64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub heat_pump2: Vec<i64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub fan: Vec<i64>,
}

/// Thermostat settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Settings {
    /// Current HVAC mode: `auto`, `auxHeatOnly`, `cool`, `heat` or `off`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub hvac_mode: String,
}

/// Weather forecast attached to a thermostat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Weather {
    /// Forecast entries; the first one describes current conditions.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub forecasts: Vec<Forecast>,
}

/// A single forecast entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Forecast {
    /// Local time the forecast applies to, e.g. `2024-01-08 12:00:00`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub date_time: String,

    /// Forecast temperature.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub temperature: i64,
}

/// Builder for constructing `Thermostat` instances.
#[derive(Debug)]
pub struct ThermostatBuilder {
    thermostat: Thermostat,
}

impl ThermostatBuilder {
    /// Create a new builder.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            thermostat: Thermostat {
                identifier: identifier.into(),
                name: name.into(),
                ..Default::default()
            },
        }
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.thermostat.runtime.connected = connected;
        self
    }

    pub fn actual_temperature(mut self, raw: i64) -> Self {
        self.thermostat.runtime.actual_temperature = raw;
        self
    }

    /// Set the heat and cool set points.
    pub fn set_points(mut self, heat: i64, cool: i64) -> Self {
        self.thermostat.runtime.desired_heat = heat;
        self.thermostat.runtime.desired_cool = cool;
        self
    }

    pub fn hvac_mode(mut self, mode: impl Into<String>) -> Self {
        self.thermostat.settings.hvac_mode = mode.into();
        self
    }

    /// Adjust the extended runtime in place.
    pub fn extended_runtime<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ExtendedRuntime),
    {
        f(&mut self.thermostat.extended_runtime);
        self
    }

    /// Append a forecast entry.
    pub fn forecast(mut self, date_time: impl Into<String>, temperature: i64) -> Self {
        self.thermostat.weather.forecasts.push(Forecast {
            date_time: date_time.into(),
            temperature,
        });
        self
    }

    /// Add a remote sensor built using a closure.
    pub fn sensor<F>(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        sensor_type: impl Into<String>,
        f: F,
    ) -> Self
    where
        F: FnOnce(RemoteSensorBuilder) -> RemoteSensorBuilder,
    {
        let sensor = f(RemoteSensor::builder(id, name, sensor_type)).build();
        self.thermostat.remote_sensors.push(sensor);
        self
    }

    /// Build the thermostat.
    pub fn build(self) -> Thermostat {
        self.thermostat
    }
}
