//! Tracing subscriber setup for the binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// An explicit `level` (any `EnvFilter` directive, e.g. `debug` or
/// `ecobee_exporter=trace`) wins over `RUST_LOG`.
pub fn init(level: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(filter(level)?)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_level(true))
        .try_init()?;
    Ok(())
}

fn filter(level: Option<&str>) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    match level {
        Some(level) => EnvFilter::try_new(level),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}
