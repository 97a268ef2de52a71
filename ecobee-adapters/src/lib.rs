//! # ecobee-adapters
//!
//! Clients for fetching thermostat state from the ecobee cloud API.
//!
//! The [`ecobee::EcobeeAdapter`] queries the REST API with a pre-issued
//! OAuth access token. Obtaining and refreshing that token is left to the
//! caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecobee_adapters::ecobee::EcobeeAdapter;
//! use ecobee_adapters::Selection;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = EcobeeAdapter::builder()
//!         .access_token("my-access-token")
//!         .build()?;
//!
//!     let thermostats = adapter.fetch_thermostats(&Selection::registered()).await?;
//!
//!     println!("Fetched {} thermostats", thermostats.len());
//!     Ok(())
//! }
//! ```

pub mod ecobee;
pub mod error;

pub use error::AdapterError;

// Re-export types for convenience
pub use ecobee_types::{Selection, Thermostat, ThermostatResponse};
