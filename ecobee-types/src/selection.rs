//! Selection - which thermostats and sub-objects a query returns.

/// Selection type matching every thermostat registered to the account.
pub const SELECTION_REGISTERED: &str = "registered";

/// Query options controlling which thermostats are returned and which nested
/// objects are included for each of them.
///
/// Serializes to the `selection` object of the ecobee thermostat request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Selection {
    /// How thermostats are matched (e.g. `registered`, `thermostats`).
    pub selection_type: String,

    /// Match value for the selection type; empty for `registered`.
    pub selection_match: String,

    /// Include remote sensors and their capabilities.
    pub include_sensors: bool,

    /// Include the current runtime state.
    pub include_runtime: bool,

    /// Include equipment run history for the last intervals.
    pub include_extended_runtime: bool,

    /// Include thermostat settings (HVAC mode etc.).
    pub include_settings: bool,

    /// Include the weather forecast.
    pub include_weather: bool,
}

impl Selection {
    /// Selection used for every scrape: all registered thermostats, with
    /// sensors, runtime, extended runtime, settings and weather.
    pub fn registered() -> Self {
        Self {
            selection_type: SELECTION_REGISTERED.to_string(),
            selection_match: String::new(),
            include_sensors: true,
            include_runtime: true,
            include_extended_runtime: true,
            include_settings: true,
            include_weather: true,
        }
    }
}
