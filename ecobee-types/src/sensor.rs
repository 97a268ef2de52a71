//! Remote sensors and their capabilities.

/// A sensor reporting to a thermostat.
///
/// The thermostat's own built-in sensor is listed here too, with sensor type
/// `thermostat`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RemoteSensor {
    /// Sensor id, unique within its thermostat (e.g. `rs:100`, `ei:0`).
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub id: String,

    /// User-assigned sensor name.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub name: String,

    /// Sensor type, e.g. `thermostat`, `ecobee3_remote_sensor`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub sensor_type: String,

    /// Whether the sensor takes part in the thermostat's comfort settings.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub in_use: bool,

    /// Telemetry channels reported by the sensor.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub capability: Vec<Capability>,
}

impl RemoteSensor {
    /// Create a builder for a sensor with the given identity.
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
        sensor_type: impl Into<String>,
    ) -> RemoteSensorBuilder {
        RemoteSensorBuilder::new(id, name, sensor_type)
    }
}

/// One telemetry channel of a sensor.
///
/// Values are always transmitted as strings, whatever their meaning: an
/// integer, a float, `true`/`false`, or the literal `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Capability {
    /// Capability id, unique within its sensor.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub id: String,

    /// Capability type tag, e.g. `temperature`, `humidity`, `co2PPM`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub capability_type: String,

    /// Raw value as reported.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub value: String,
}

impl Capability {
    /// Create a capability with the given type and value.
    pub fn new(capability_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            capability_type: capability_type.into(),
            value: value.into(),
        }
    }
}

/// Builder for constructing `RemoteSensor` instances.
#[derive(Debug)]
pub struct RemoteSensorBuilder {
    sensor: RemoteSensor,
}

impl RemoteSensorBuilder {
    /// Create a new builder.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sensor_type: impl Into<String>,
    ) -> Self {
        Self {
            sensor: RemoteSensor {
                id: id.into(),
                name: name.into(),
                sensor_type: sensor_type.into(),
                ..Default::default()
            },
        }
    }

    pub fn in_use(mut self, in_use: bool) -> Self {
        self.sensor.in_use = in_use;
        self
    }

    /// Append a capability; its id is its position in the list.
    pub fn capability(
        mut self,
        capability_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut capability = Capability::new(capability_type, value);
        capability.id = self.sensor.capability.len().to_string();
        self.sensor.capability.push(capability);
        self
    }

    /// Build the sensor.
    pub fn build(self) -> RemoteSensor {
        self.sensor
    }
}
