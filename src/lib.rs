//! # ecobee-exporter
//!
//! A Prometheus exporter for ecobee thermostats and their remote sensors.
//!
//! On every scrape the exporter asks the ecobee API for all registered
//! thermostats and translates the response into gauges: temperatures, set
//! points, HVAC mode, equipment run state, outside temperature, and one
//! sample per remote sensor capability.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  server ──▶ exposition ──▶ collector ──▶ source              │
//! │  (hyper)    (Registry,      (catalog,     EcobeeAdapter      │
//! │              format)         capability,  | FileSource       │
//! │                              convert)     | StaticSource     │
//! │                                 │                            │
//! │                                 ▼                            │
//! │                          sink (Samples)                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the [`ThermostatSource`] trait and its implementations
//! - **[`collector`]**: one fetch per scrape, translated into samples
//! - **[`catalog`]**: the fixed set of metric descriptors under a prefix
//! - **[`capability`]**: remote sensor capability kinds and value decoding
//! - **[`exposition`]**: text exposition format and the descriptor registry
//! - **[`server`]**: the HTTP scrape endpoint
//! - **[`settings`]**: layered configuration
//!
//! ## Usage
//!
//! ```bash
//! # Scrape the ecobee API
//! ecobee-exporter --access-token "$ECOBEE_TOKEN"
//!
//! # Serve a saved API response instead
//! ecobee-exporter --file thermostats.json --once
//! ```
//!
//! ### As a library
//!
//! ```rust
//! use ecobee_exporter::{EcobeeCollector, Samples, StaticSource};
//! use ecobee_types::Thermostat;
//!
//! # tokio_test::block_on(async {
//! let thermostat = Thermostat::builder("1", "Hallway")
//!     .connected(true)
//!     .actual_temperature(700)
//!     .build();
//! let collector = EcobeeCollector::new(Box::new(StaticSource::new(vec![thermostat])), "ecobee");
//!
//! let mut samples = Samples::new();
//! collector.collect(&mut samples).await;
//! assert_eq!(samples.get("ecobee_actual_temperature", &["1", "Hallway"]), Some(70.0));
//! # });
//! ```

pub mod capability;
pub mod catalog;
pub mod collector;
pub mod convert;
pub mod exposition;
pub mod logging;
pub mod server;
pub mod settings;
pub mod sink;
pub mod source;

pub use catalog::{Catalog, Descriptor, Equipment};
pub use collector::EcobeeCollector;
pub use exposition::{format_prometheus, PrometheusExporter, Registry};
pub use settings::{ExporterConfig, Overrides};
pub use sink::{MetricSink, Sample, Samples};
pub use source::{FileSource, StaticSource, ThermostatSource};
