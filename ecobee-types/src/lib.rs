//! # ecobee-types
//!
//! Types describing what the ecobee cloud API returns for a thermostat
//! query, and the selection used to ask for it.
//!
//! ## Design Goals
//!
//! - **Tolerant decoding**: every field defaults when absent or `null` on the
//!   wire, so a thermostat missing a sub-object still decodes
//! - **Optional serialization**: enable the `serde` feature to read and write
//!   the ecobee JSON wire format (camelCase field names)
//! - **Ergonomic builders**: fluent API for constructing thermostats in tests
//!   and fixtures
//!
//! ## Features
//!
//! - `serde`: JSON (de)serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use ecobee_types::Thermostat;
//!
//! let thermostat = Thermostat::builder("511863231287", "Hallway")
//!     .connected(true)
//!     .actual_temperature(705)
//!     .hvac_mode("heat")
//!     .forecast("2024-01-08 12:00:00", 412)
//!     .sensor("rs:100", "Bedroom", "ecobee3_remote_sensor", |s| {
//!         s.in_use(true)
//!             .capability("temperature", "684")
//!             .capability("occupancy", "false")
//!     })
//!     .build();
//!
//! assert!(thermostat.is_connected());
//! assert_eq!(thermostat.remote_sensors.len(), 1);
//! ```

mod response;
mod selection;
mod sensor;
mod thermostat;
#[cfg(feature = "serde")]
mod wire;

pub use response::*;
pub use selection::*;
pub use sensor::*;
pub use thermostat::*;
