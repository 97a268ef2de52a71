//! Metric descriptors exported by the collector.
//!
//! The [`Catalog`] is built once from a name prefix and never changes
//! afterwards. Every descriptor is known before the first scrape, whatever
//! the thermostats later report.

use std::fmt;

use crate::capability::CapabilityKind;

/// No labels.
pub const NO_LABELS: &[&str] = &[];

/// Labels identifying a thermostat.
pub const RUNTIME_LABELS: &[&str] = &["thermostat_id", "thermostat_name"];

/// Thermostat labels plus the equipment stage name.
pub const EQUIPMENT_LABELS: &[&str] = &["thermostat_id", "thermostat_name", "name"];

/// Thermostat labels plus the HVAC mode.
pub const HVAC_MODE_LABELS: &[&str] = &["thermostat_id", "thermostat_name", "current_hvac_mode"];

/// Thermostat labels plus the sensor identity.
pub const SENSOR_LABELS: &[&str] = &[
    "thermostat_id",
    "thermostat_name",
    "sensor_id",
    "sensor_name",
    "sensor_type",
];

/// Identity of a metric: its full name, help text and ordered label names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: String,
    help: &'static str,
    labels: &'static [&'static str],
}

impl Descriptor {
    fn new(prefix: &str, suffix: &str, help: &'static str, labels: &'static [&'static str]) -> Self {
        Self {
            name: format!("{}_{}", prefix, suffix),
            help,
            labels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        self.help
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.name, self.labels.join(","))
    }
}

/// A piece of HVAC equipment whose recent run history is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equipment {
    AuxHeat1,
    AuxHeat2,
    AuxHeat3,
    Cool1,
    Cool2,
    HeatPump1,
    HeatPump2,
    Fan,
}

impl Equipment {
    /// Every channel, in emission order.
    pub const ALL: [Equipment; 8] = [
        Equipment::AuxHeat1,
        Equipment::AuxHeat2,
        Equipment::AuxHeat3,
        Equipment::Cool1,
        Equipment::Cool2,
        Equipment::HeatPump1,
        Equipment::HeatPump2,
        Equipment::Fan,
    ];

    /// Value of the `name` label on `equipment_running`.
    pub fn stage(self) -> &'static str {
        match self {
            Equipment::AuxHeat1 => "heat 1",
            Equipment::AuxHeat2 => "heat 2",
            Equipment::AuxHeat3 => "heat 3",
            Equipment::Cool1 => "cooling 1",
            Equipment::Cool2 => "cooling 2",
            Equipment::HeatPump1 => "heat pump 1",
            Equipment::HeatPump2 => "heat pump 2",
            Equipment::Fan => "fan",
        }
    }

    /// Run-duration samples for this channel.
    pub fn samples(self, runtime: &ecobee_types::ExtendedRuntime) -> &[i64] {
        match self {
            Equipment::AuxHeat1 => &runtime.aux_heat1,
            Equipment::AuxHeat2 => &runtime.aux_heat2,
            Equipment::AuxHeat3 => &runtime.aux_heat3,
            Equipment::Cool1 => &runtime.cool1,
            Equipment::Cool2 => &runtime.cool2,
            Equipment::HeatPump1 => &runtime.heat_pump1,
            Equipment::HeatPump2 => &runtime.heat_pump2,
            Equipment::Fan => &runtime.fan,
        }
    }
}

/// Every metric descriptor of one collector, scoped under a common prefix.
///
/// Note that metric names must be unique within a registry: two catalogs
/// built with the same prefix cannot be registered side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    prefix: String,

    // per-query
    pub fetch_time: Descriptor,

    // runtime
    pub actual_temperature: Descriptor,
    pub target_temperature_max: Descriptor,
    pub target_temperature_min: Descriptor,

    // sensors
    pub temperature: Descriptor,
    pub humidity: Descriptor,
    pub voc: Descriptor,
    pub co2: Descriptor,
    pub air_quality: Descriptor,
    pub air_quality_accuracy: Descriptor,
    pub air_pressure: Descriptor,
    pub occupancy: Descriptor,
    pub in_use: Descriptor,

    pub current_hvac_mode: Descriptor,

    // outside air
    pub outside_temperature: Descriptor,
    pub outside_temperature_fahrenheit: Descriptor,

    // equipment
    pub equipment_running: Descriptor,
    pub aux_heat1: Descriptor,
    pub aux_heat2: Descriptor,
    pub aux_heat3: Descriptor,
    pub comp_cool1: Descriptor,
    pub comp_cool2: Descriptor,
    pub heat_pump1: Descriptor,
    pub heat_pump2: Descriptor,
    pub fan: Descriptor,
}

impl Catalog {
    /// Build every descriptor under `{prefix}_`.
    pub fn build(prefix: &str) -> Self {
        let d = |suffix: &str, help: &'static str, labels: &'static [&'static str]| {
            Descriptor::new(prefix, suffix, help, labels)
        };

        Self {
            prefix: prefix.to_string(),

            fetch_time: d("fetch_time", "elapsed time fetching data via Ecobee API", NO_LABELS),

            actual_temperature: d(
                "actual_temperature",
                "thermostat-averaged current temperature",
                RUNTIME_LABELS,
            ),
            target_temperature_max: d(
                "target_temperature_max",
                "maximum temperature for thermostat to maintain",
                RUNTIME_LABELS,
            ),
            target_temperature_min: d(
                "target_temperature_min",
                "minimum temperature for thermostat to maintain",
                RUNTIME_LABELS,
            ),

            temperature: d(
                "temperature",
                "temperature reported by a sensor in degrees",
                SENSOR_LABELS,
            ),
            humidity: d(
                "humidity",
                "humidity reported by a sensor in percent",
                SENSOR_LABELS,
            ),
            voc: d("volitile_organic_compounds_ppm", "VOCs", SENSOR_LABELS),
            co2: d("carbon_dioxide_ppm", "CO2", SENSOR_LABELS),
            air_quality: d("air_quality", "air quality", SENSOR_LABELS),
            air_quality_accuracy: d(
                "air_quality_accuracy",
                "air quality accuracy",
                SENSOR_LABELS,
            ),
            air_pressure: d("air_pressure", "air pressure in ??", SENSOR_LABELS),
            occupancy: d(
                "occupancy",
                "occupancy reported by a sensor (0 or 1)",
                SENSOR_LABELS,
            ),
            in_use: d(
                "in_use",
                "is sensor being used in thermostat calculations (0 or 1)",
                SENSOR_LABELS,
            ),

            current_hvac_mode: d(
                "currenthvacmode",
                "current hvac mode of thermostat",
                HVAC_MODE_LABELS,
            ),

            outside_temperature: d(
                "outside_temperature",
                "current outside temperature (Celsius)",
                RUNTIME_LABELS,
            ),
            outside_temperature_fahrenheit: d(
                "outside_temperature_fahrenheit",
                "current outside temperature (Fahrenheit)",
                RUNTIME_LABELS,
            ),

            equipment_running: d(
                "equipment_running",
                "equipment currently running (1 for on, 0 for off)",
                EQUIPMENT_LABELS,
            ),
            aux_heat1: d("aux_heat1", "Heat stage 1", RUNTIME_LABELS),
            aux_heat2: d("aux_heat2", "Heat stage 2", RUNTIME_LABELS),
            aux_heat3: d("aux_heat3", "Heat stage 3", RUNTIME_LABELS),
            comp_cool1: d("comp_cool1", "Cool stage 1", RUNTIME_LABELS),
            comp_cool2: d("comp_cool2", "Cool stage 2", RUNTIME_LABELS),
            heat_pump1: d("heat_pump1", "Heat pump stage 1", RUNTIME_LABELS),
            heat_pump2: d("heat_pump2", "Heat pump stage 2", RUNTIME_LABELS),
            fan: d("fan", "current hvac mode of thermostat", RUNTIME_LABELS),
        }
    }

    /// The prefix all names were built with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Every descriptor exactly once, in a fixed order.
    pub fn describe(&self) -> impl Iterator<Item = &Descriptor> + '_ {
        [
            &self.fetch_time,
            &self.actual_temperature,
            &self.target_temperature_max,
            &self.target_temperature_min,
            &self.temperature,
            &self.humidity,
            &self.voc,
            &self.co2,
            &self.air_quality,
            &self.air_quality_accuracy,
            &self.air_pressure,
            &self.occupancy,
            &self.in_use,
            &self.current_hvac_mode,
            &self.outside_temperature,
            &self.outside_temperature_fahrenheit,
            &self.equipment_running,
            &self.aux_heat1,
            &self.aux_heat2,
            &self.aux_heat3,
            &self.comp_cool1,
            &self.comp_cool2,
            &self.heat_pump1,
            &self.heat_pump2,
            &self.fan,
        ]
        .into_iter()
    }

    /// Dedicated per-channel metric for a piece of equipment.
    pub fn equipment(&self, equipment: Equipment) -> &Descriptor {
        match equipment {
            Equipment::AuxHeat1 => &self.aux_heat1,
            Equipment::AuxHeat2 => &self.aux_heat2,
            Equipment::AuxHeat3 => &self.aux_heat3,
            Equipment::Cool1 => &self.comp_cool1,
            Equipment::Cool2 => &self.comp_cool2,
            Equipment::HeatPump1 => &self.heat_pump1,
            Equipment::HeatPump2 => &self.heat_pump2,
            Equipment::Fan => &self.fan,
        }
    }

    /// Metric a sensor capability is exported on, if it has one.
    pub fn capability(&self, kind: CapabilityKind) -> Option<&Descriptor> {
        match kind {
            CapabilityKind::Temperature => Some(&self.temperature),
            CapabilityKind::Humidity => Some(&self.humidity),
            CapabilityKind::Occupancy => Some(&self.occupancy),
            CapabilityKind::Voc => Some(&self.voc),
            CapabilityKind::Co2 => Some(&self.co2),
            CapabilityKind::AirQuality => Some(&self.air_quality),
            CapabilityKind::AirQualityAccuracy => Some(&self.air_quality_accuracy),
            CapabilityKind::AirPressure => Some(&self.air_pressure),
            CapabilityKind::Unrecognized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const SUFFIXES: [&str; 25] = [
        "fetch_time",
        "actual_temperature",
        "target_temperature_max",
        "target_temperature_min",
        "temperature",
        "humidity",
        "volitile_organic_compounds_ppm",
        "carbon_dioxide_ppm",
        "air_quality",
        "air_quality_accuracy",
        "air_pressure",
        "occupancy",
        "in_use",
        "currenthvacmode",
        "outside_temperature",
        "outside_temperature_fahrenheit",
        "equipment_running",
        "aux_heat1",
        "aux_heat2",
        "aux_heat3",
        "comp_cool1",
        "comp_cool2",
        "heat_pump1",
        "heat_pump2",
        "fan",
    ];

    #[test]
    fn test_describe_yields_every_descriptor_once() {
        let catalog = Catalog::build("ecobee");
        let names: Vec<&str> = catalog.describe().map(|d| d.name()).collect();

        assert_eq!(names.len(), 25);
        let expected: Vec<String> = SUFFIXES.iter().map(|s| format!("ecobee_{}", s)).collect();
        assert_eq!(names, expected);

        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = Catalog::build("home");
        let b = Catalog::build("home");
        assert_eq!(a, b);
        assert!(a.describe().eq(b.describe()));
        assert_eq!(a.prefix(), "home");
    }

    #[test]
    fn test_label_sets() {
        let catalog = Catalog::build("ecobee");

        assert!(catalog.fetch_time.labels().is_empty());
        assert_eq!(catalog.actual_temperature.labels(), RUNTIME_LABELS);
        assert_eq!(catalog.outside_temperature.labels(), RUNTIME_LABELS);
        assert_eq!(catalog.fan.labels(), RUNTIME_LABELS);
        assert_eq!(
            catalog.equipment_running.labels(),
            &["thermostat_id", "thermostat_name", "name"]
        );
        assert_eq!(
            catalog.current_hvac_mode.labels(),
            &["thermostat_id", "thermostat_name", "current_hvac_mode"]
        );
        assert_eq!(catalog.in_use.labels(), SENSOR_LABELS);
        assert_eq!(catalog.air_pressure.labels(), SENSOR_LABELS);
    }

    #[test]
    fn test_equipment_descriptors_are_distinct() {
        let catalog = Catalog::build("ecobee");
        let names: HashSet<&str> = Equipment::ALL
            .iter()
            .map(|e| catalog.equipment(*e).name())
            .collect();
        assert_eq!(names.len(), Equipment::ALL.len());
        assert_eq!(catalog.equipment(Equipment::Cool2).name(), "ecobee_comp_cool2");
    }

    #[test]
    fn test_capability_descriptors() {
        let catalog = Catalog::build("ecobee");
        assert_eq!(
            catalog.capability(CapabilityKind::Co2).map(|d| d.name()),
            Some("ecobee_carbon_dioxide_ppm")
        );
        assert_eq!(
            catalog.capability(CapabilityKind::Voc).map(|d| d.name()),
            Some("ecobee_volitile_organic_compounds_ppm")
        );
        assert!(catalog.capability(CapabilityKind::Unrecognized).is_none());
    }

    #[test]
    fn test_descriptor_display() {
        let catalog = Catalog::build("ecobee");
        assert_eq!(
            catalog.actual_temperature.to_string(),
            "ecobee_actual_temperature{thermostat_id,thermostat_name}"
        );
    }
}
