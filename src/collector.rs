//! The scrape-time collector.
//!
//! On every scrape [`EcobeeCollector::collect`] fetches all registered
//! thermostats once and turns what comes back into gauge samples. Nothing is
//! kept between scrapes: a thermostat missing from one response has no
//! samples in that scrape.
//!
//! Failures are scoped as narrowly as possible. A failed fetch still yields
//! `fetch_time` and nothing else; a capability value that cannot be decoded
//! drops that one sample and the rest of the scrape goes on.

use std::time::Instant;

use ecobee_types::{RemoteSensor, Selection, Thermostat};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::capability::CapabilityTable;
use crate::catalog::{Catalog, Descriptor, Equipment};
use crate::convert::{celsius, fahrenheit, flag, is_thing_running};
use crate::sink::MetricSink;
use crate::source::ThermostatSource;

/// Gathers ecobee metrics on demand.
///
/// Scrapes are serialized: a second `collect` waits for the first to finish.
#[derive(Debug)]
pub struct EcobeeCollector {
    source: Box<dyn ThermostatSource>,
    catalog: Catalog,
    capabilities: CapabilityTable,
    scrape_lock: Mutex<()>,
}

impl EcobeeCollector {
    /// Create a collector with all metric names under `prefix`.
    pub fn new(source: Box<dyn ThermostatSource>, prefix: &str) -> Self {
        Self {
            source,
            catalog: Catalog::build(prefix),
            capabilities: CapabilityTable::new(),
            scrape_lock: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every descriptor this collector can emit, independent of any scrape.
    pub fn describe(&self) -> impl Iterator<Item = &Descriptor> + '_ {
        self.catalog.describe()
    }

    /// Run one scrape, emitting every derivable sample into `sink`.
    pub async fn collect(&self, sink: &mut dyn MetricSink) {
        let _scrape = self.scrape_lock.lock().await;

        let start = Instant::now();
        let result = self.source.fetch(&Selection::registered()).await;
        sink.emit(&self.catalog.fetch_time, start.elapsed().as_secs_f64(), &[]);

        let thermostats = match result {
            Ok(thermostats) => thermostats,
            Err(e) => {
                error!(
                    source = self.source.description(),
                    error = %e,
                    "failed to fetch thermostats"
                );
                return;
            }
        };

        self.translate(&thermostats, sink);
        debug!(thermostats = thermostats.len(), "scrape complete");
    }

    /// Emit the samples for an already fetched response.
    pub fn translate(&self, thermostats: &[Thermostat], sink: &mut dyn MetricSink) {
        for thermostat in thermostats {
            let thermostat_labels = [thermostat.identifier.as_str(), thermostat.name.as_str()];

            if thermostat.is_connected() {
                self.emit_runtime(thermostat, &thermostat_labels, sink);
            }

            for sensor in &thermostat.remote_sensors {
                self.emit_sensor(&thermostat_labels, sensor, sink);
            }
        }
    }

    fn emit_runtime(
        &self,
        thermostat: &Thermostat,
        labels: &[&str; 2],
        sink: &mut dyn MetricSink,
    ) {
        let c = &self.catalog;
        let runtime = &thermostat.runtime;

        for forecast in &thermostat.weather.forecasts {
            info!(
                thermostat = %thermostat.name,
                at = %forecast.date_time,
                celsius = celsius(forecast.temperature),
                "forecast"
            );
        }

        sink.emit(&c.actual_temperature, fahrenheit(runtime.actual_temperature), labels);
        sink.emit(&c.target_temperature_max, fahrenheit(runtime.desired_cool), labels);
        sink.emit(&c.target_temperature_min, fahrenheit(runtime.desired_heat), labels);

        // The mode is the label; the value only marks presence.
        sink.emit(
            &c.current_hvac_mode,
            0.0,
            &[labels[0], labels[1], thermostat.settings.hvac_mode.as_str()],
        );

        for equipment in Equipment::ALL {
            let running = is_thing_running(equipment.samples(&thermostat.extended_runtime));
            sink.emit(
                &c.equipment_running,
                running,
                &[labels[0], labels[1], equipment.stage()],
            );
            sink.emit(c.equipment(equipment), running, labels);
        }

        match thermostat.current_forecast() {
            Some(forecast) => {
                sink.emit(
                    &c.outside_temperature_fahrenheit,
                    fahrenheit(forecast.temperature),
                    labels,
                );
                sink.emit(&c.outside_temperature, celsius(forecast.temperature), labels);
            }
            None => warn!(
                thermostat = %thermostat.name,
                "no weather forecast; skipping outside temperature"
            ),
        }
    }

    fn emit_sensor(
        &self,
        thermostat_labels: &[&str; 2],
        sensor: &RemoteSensor,
        sink: &mut dyn MetricSink,
    ) {
        let labels = [
            thermostat_labels[0],
            thermostat_labels[1],
            sensor.id.as_str(),
            sensor.name.as_str(),
            sensor.sensor_type.as_str(),
        ];

        sink.emit(&self.catalog.in_use, flag(sensor.in_use), &labels);

        for capability in &sensor.capability {
            let kind = self.capabilities.lookup(&capability.capability_type);
            let descriptor = match self.catalog.capability(kind) {
                Some(descriptor) => descriptor,
                None => {
                    info!(capability = %capability.capability_type, "ignoring sensor capability");
                    continue;
                }
            };

            match kind.decode(&capability.value) {
                Ok(Some(value)) => sink.emit(descriptor, value, &labels),
                Ok(None) => {}
                Err(e) => error!(
                    sensor = %sensor.name,
                    capability = %capability.capability_type,
                    value = %capability.value,
                    error = %e,
                    "failed to decode sensor capability"
                ),
            }
        }
    }
}
