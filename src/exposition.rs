//! Prometheus exposition format support.
//!
//! This module renders collected samples in the Prometheus text-based
//! exposition format, which can be scraped by Prometheus or compatible
//! monitoring systems.
//!
//! ## Example
//!
//! ```rust
//! use ecobee_exporter::{EcobeeCollector, PrometheusExporter, StaticSource};
//! use ecobee_types::Thermostat;
//!
//! # tokio_test::block_on(async {
//! let source = StaticSource::new(vec![
//!     Thermostat::builder("511863231287", "Hallway")
//!         .connected(true)
//!         .actual_temperature(705)
//!         .build(),
//! ]);
//! let collector = EcobeeCollector::new(Box::new(source), "ecobee");
//! let exporter = PrometheusExporter::new(collector).unwrap();
//!
//! let output = exporter.render().await;
//! assert!(output.contains(
//!     "ecobee_actual_temperature{thermostat_id=\"511863231287\",thermostat_name=\"Hallway\"} 70.5"
//! ));
//! # });
//! ```

use std::fmt::Write;

use thiserror::Error;

use crate::catalog::Descriptor;
use crate::collector::EcobeeCollector;
use crate::sink::Samples;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Errors raised while declaring metrics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two descriptors share a name, e.g. two collectors with one prefix.
    #[error("metric {0} is already registered")]
    Duplicate(String),
}

/// The set of declared metric descriptors, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: Vec<Descriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a descriptor. Names must be unique within the registry.
    pub fn declare(&mut self, descriptor: &Descriptor) -> Result<(), RegistryError> {
        if self.descriptors.iter().any(|d| d.name() == descriptor.name()) {
            return Err(RegistryError::Duplicate(descriptor.name().to_string()));
        }
        self.descriptors.push(descriptor.clone());
        Ok(())
    }

    /// Declare every descriptor a collector can emit.
    pub fn register(&mut self, collector: &EcobeeCollector) -> Result<(), RegistryError> {
        collector.describe().try_for_each(|d| self.declare(d))
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Exporter running one collection per render.
#[derive(Debug)]
pub struct PrometheusExporter {
    collector: EcobeeCollector,
    registry: Registry,
}

impl PrometheusExporter {
    /// Create an exporter and declare the collector's metrics.
    pub fn new(collector: EcobeeCollector) -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        registry.register(&collector)?;
        Ok(Self {
            collector,
            registry,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Scrape once and render the result in exposition format.
    pub async fn render(&self) -> String {
        let mut samples = Samples::new();
        self.collector.collect(&mut samples).await;
        format_prometheus(&self.registry, &samples)
    }
}

/// Format samples as Prometheus exposition format.
///
/// Every declared descriptor gets its HELP and TYPE lines, followed by its
/// samples in emission order. Samples of undeclared metrics are left out.
pub fn format_prometheus(registry: &Registry, samples: &Samples) -> String {
    let mut output = String::new();

    for descriptor in registry.descriptors() {
        let name = descriptor.name();
        let _ = writeln!(output, "# HELP {} {}", name, escape_help(descriptor.help()));
        let _ = writeln!(output, "# TYPE {} gauge", name);

        for sample in samples.named(name) {
            output.push_str(name);
            if !sample.labels.is_empty() {
                let labels: Vec<String> = sample
                    .labels
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
                    .collect();
                let _ = write!(output, "{{{}}}", labels.join(","));
            }
            let _ = writeln!(output, " {}", format_value(sample.value));
        }
    }

    output
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "+Inf" } else { "-Inf" }.to_string()
    } else {
        value.to_string()
    }
}

/// Escape a label value for Prometheus format.
/// Backslash, double-quote, and newline must be escaped.
fn escape_label_value(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape HELP text: backslash and newline.
fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::sink::MetricSink;
    use crate::source::StaticSource;

    fn registry(catalog: &Catalog) -> Registry {
        let mut registry = Registry::new();
        for d in catalog.describe() {
            registry.declare(d).unwrap();
        }
        registry
    }

    #[test]
    fn test_format_prometheus_basic() {
        let catalog = Catalog::build("ecobee");
        let mut samples = Samples::new();
        samples.emit(&catalog.fetch_time, 0.5, &[]);
        samples.emit(&catalog.actual_temperature, 70.5, &["1", "Hallway"]);
        samples.emit(&catalog.in_use, 1.0, &["1", "Hallway", "rs:100", "Bedroom", "ecobee3_remote_sensor"]);

        let output = format_prometheus(&registry(&catalog), &samples);

        assert!(output.contains("ecobee_fetch_time 0.5\n"));
        assert!(output.contains(
            "ecobee_actual_temperature{thermostat_id=\"1\",thermostat_name=\"Hallway\"} 70.5\n"
        ));
        assert!(output.contains(
            "ecobee_in_use{thermostat_id=\"1\",thermostat_name=\"Hallway\",sensor_id=\"rs:100\",sensor_name=\"Bedroom\",sensor_type=\"ecobee3_remote_sensor\"} 1\n"
        ));
    }

    #[test]
    fn test_format_includes_help_and_type() {
        let catalog = Catalog::build("ecobee");
        let output = format_prometheus(&registry(&catalog), &Samples::new());

        assert!(output.contains("# HELP ecobee_fetch_time elapsed time fetching data via Ecobee API\n"));
        assert!(output.contains("# TYPE ecobee_fetch_time gauge\n"));
        assert!(output.contains("# TYPE ecobee_currenthvacmode gauge\n"));
        assert_eq!(output.matches("# TYPE ").count(), 25);
    }

    #[test]
    fn test_undeclared_samples_are_left_out() {
        let catalog = Catalog::build("ecobee");
        let other = Catalog::build("other");
        let mut samples = Samples::new();
        samples.emit(&other.fetch_time, 1.0, &[]);

        let output = format_prometheus(&registry(&catalog), &samples);

        assert!(!output.contains("other_fetch_time"));
    }

    #[test]
    fn test_escape_label_value() {
        assert_eq!(escape_label_value("simple"), "simple");
        assert_eq!(escape_label_value("with\"quote"), "with\\\"quote");
        assert_eq!(escape_label_value("with\\backslash"), "with\\\\backslash");
        assert_eq!(escape_label_value("with\nnewline"), "with\\nnewline");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(70.5), "70.5");
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let catalog = Catalog::build("ecobee");
        let mut registry = registry(&catalog);

        assert_eq!(registry.len(), 25);
        assert_eq!(
            registry.declare(&catalog.fan),
            Err(RegistryError::Duplicate("ecobee_fan".to_string()))
        );
        assert_eq!(registry.len(), 25);
    }

    #[test]
    fn test_two_prefixes_share_a_registry() {
        let a = EcobeeCollector::new(Box::new(StaticSource::new(Vec::new())), "upstairs");
        let b = EcobeeCollector::new(Box::new(StaticSource::new(Vec::new())), "downstairs");
        let mut registry = Registry::new();

        registry.register(&a).unwrap();
        registry.register(&b).unwrap();
        assert_eq!(registry.len(), 50);
        assert!(registry.register(&a).is_err());
    }

    #[tokio::test]
    async fn test_exporter_render() {
        let source = StaticSource::unavailable("offline");
        let exporter =
            PrometheusExporter::new(EcobeeCollector::new(Box::new(source), "ecobee")).unwrap();

        let output = exporter.render().await;

        assert_eq!(exporter.registry().len(), 25);
        assert!(output.contains("# HELP ecobee_actual_temperature"));
        let sample_lines: Vec<&str> = output.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(sample_lines.len(), 1);
        assert!(sample_lines[0].starts_with("ecobee_fetch_time "));
    }
}
