//! Destination for collected observations.

use tracing::warn;

use crate::catalog::Descriptor;

/// Receives gauge observations produced by a scrape.
///
/// `label_values` are given in the order of [`Descriptor::labels`].
/// Descriptors are declared up front on a
/// [`Registry`](crate::exposition::Registry) with
/// [`Registry::declare`](crate::exposition::Registry::declare); a sink only
/// receives samples.
pub trait MetricSink: Send {
    fn emit(&mut self, descriptor: &Descriptor, value: f64, label_values: &[&str]);
}

/// One observation: a metric name, its label pairs and a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl Sample {
    /// Value of a label, if present.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory buffer of the samples of one scrape.
#[derive(Debug, Clone, Default)]
pub struct Samples {
    samples: Vec<Sample>,
}

impl Samples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over samples in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Samples for one metric name.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples.iter().filter(move |s| s.name == name)
    }

    /// Value of the sample with this name and exactly these label values.
    pub fn get(&self, name: &str, label_values: &[&str]) -> Option<f64> {
        self.named(name)
            .find(|s| {
                s.labels.len() == label_values.len()
                    && s.labels.iter().zip(label_values).all(|((_, v), want)| v.as_str() == *want)
            })
            .map(|s| s.value)
    }
}

impl MetricSink for Samples {
    fn emit(&mut self, descriptor: &Descriptor, value: f64, label_values: &[&str]) {
        let names = descriptor.labels();
        if names.len() != label_values.len() {
            warn!(
                metric = descriptor.name(),
                expected = names.len(),
                got = label_values.len(),
                "dropping sample with wrong number of label values"
            );
            return;
        }

        self.samples.push(Sample {
            name: descriptor.name().to_string(),
            labels: names
                .iter()
                .zip(label_values)
                .map(|(n, v)| (*n, v.to_string()))
                .collect(),
            value,
        });
    }
}

impl<'a> IntoIterator for &'a Samples {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_emit_pairs_labels_in_order() {
        let catalog = Catalog::build("ecobee");
        let mut samples = Samples::new();

        samples.emit(&catalog.actual_temperature, 70.5, &["123", "Hallway"]);

        assert_eq!(samples.len(), 1);
        let sample = samples.iter().next().unwrap();
        assert_eq!(sample.name, "ecobee_actual_temperature");
        assert_eq!(sample.label("thermostat_id"), Some("123"));
        assert_eq!(sample.label("thermostat_name"), Some("Hallway"));
        assert_eq!(sample.label("sensor_id"), None);
        assert_eq!(
            samples.get("ecobee_actual_temperature", &["123", "Hallway"]),
            Some(70.5)
        );
    }

    #[test]
    fn test_emit_without_labels() {
        let catalog = Catalog::build("ecobee");
        let mut samples = Samples::new();

        samples.emit(&catalog.fetch_time, 0.25, &[]);

        assert_eq!(samples.get("ecobee_fetch_time", &[]), Some(0.25));
    }

    #[test]
    fn test_wrong_label_count_is_dropped() {
        let catalog = Catalog::build("ecobee");
        let mut samples = Samples::new();

        samples.emit(&catalog.in_use, 1.0, &["123", "Hallway"]);

        assert!(samples.is_empty());
    }

    #[test]
    fn test_get_requires_exact_labels() {
        let catalog = Catalog::build("ecobee");
        let mut samples = Samples::new();
        samples.emit(&catalog.fan, 1.0, &["1", "Up"]);
        samples.emit(&catalog.fan, 0.0, &["2", "Down"]);

        assert_eq!(samples.get("ecobee_fan", &["2", "Down"]), Some(0.0));
        assert_eq!(samples.get("ecobee_fan", &["2"]), None);
        assert_eq!(samples.named("ecobee_fan").count(), 2);
    }
}
