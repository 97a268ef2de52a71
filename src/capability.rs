//! Decoding of remote sensor capabilities.
//!
//! Sensors report every capability value as a string. Each known capability
//! type decodes its value into a gauge reading; decoding either yields a
//! reading, yields nothing (the sensor has no reading yet), or fails for this
//! one value only.

use std::collections::HashMap;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::convert::fahrenheit;

/// Value air-quality style capabilities report before their first reading.
pub const UNKNOWN_VALUE: &str = "unknown";

/// Capability types the collector knows how to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Temperature,
    Humidity,
    Occupancy,
    Voc,
    Co2,
    AirQuality,
    AirQualityAccuracy,
    AirPressure,
    /// Any type tag not listed above.
    Unrecognized,
}

impl CapabilityKind {
    /// Every recognized kind.
    pub const KNOWN: [CapabilityKind; 8] = [
        CapabilityKind::Temperature,
        CapabilityKind::Humidity,
        CapabilityKind::Occupancy,
        CapabilityKind::Voc,
        CapabilityKind::Co2,
        CapabilityKind::AirQuality,
        CapabilityKind::AirQualityAccuracy,
        CapabilityKind::AirPressure,
    ];

    /// The type tag sensors report for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            CapabilityKind::Temperature => "temperature",
            CapabilityKind::Humidity => "humidity",
            CapabilityKind::Occupancy => "occupancy",
            CapabilityKind::Voc => "vocPPM",
            CapabilityKind::Co2 => "co2PPM",
            CapabilityKind::AirQuality => "airQuality",
            CapabilityKind::AirQualityAccuracy => "airQualityAccuracy",
            CapabilityKind::AirPressure => "airPressure",
            CapabilityKind::Unrecognized => "",
        }
    }

    /// Decode a raw value.
    ///
    /// `Ok(None)` means there is nothing to export and nothing went wrong:
    /// the `unknown` placeholder of air-quality style capabilities, or an
    /// unrecognized kind.
    pub fn decode(self, value: &str) -> Result<Option<f64>, DecodeError> {
        match self {
            CapabilityKind::Temperature => value
                .parse::<i64>()
                .map(|raw| Some(fahrenheit(raw)))
                .map_err(|source| DecodeError::Integer {
                    tag: self.tag(),
                    value: value.to_string(),
                    source,
                }),
            CapabilityKind::Humidity => parse_float(self, value).map(Some),
            CapabilityKind::Occupancy => match value {
                "true" => Ok(Some(1.0)),
                "false" => Ok(Some(0.0)),
                _ => Err(DecodeError::Occupancy(value.to_string())),
            },
            CapabilityKind::Voc
            | CapabilityKind::Co2
            | CapabilityKind::AirQuality
            | CapabilityKind::AirQualityAccuracy
            | CapabilityKind::AirPressure => {
                if value == UNKNOWN_VALUE {
                    return Ok(None);
                }
                parse_float(self, value).map(Some)
            }
            CapabilityKind::Unrecognized => Ok(None),
        }
    }
}

fn parse_float(kind: CapabilityKind, value: &str) -> Result<f64, DecodeError> {
    let parsed = value.parse::<f64>().map_err(|source| DecodeError::Float {
        tag: kind.tag(),
        value: value.to_string(),
        source,
    })?;

    // Finite literals too large for f64 parse to infinity; only an explicit
    // infinity is accepted as one.
    if parsed.is_infinite() && !spells_infinity(value) {
        return Err(DecodeError::OutOfRange {
            tag: kind.tag(),
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

fn spells_infinity(value: &str) -> bool {
    let unsigned = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// A single capability value that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("value [{tag:?}] was {value:?}: {source}")]
    Integer {
        tag: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("value [{tag:?}] was {value:?}: {source}")]
    Float {
        tag: &'static str,
        value: String,
        source: ParseFloatError,
    },

    #[error("value [{tag:?}] was {value:?}: out of range")]
    OutOfRange { tag: &'static str, value: String },

    #[error("unknown sensor occupancy value {0:?}")]
    Occupancy(String),
}

/// Lookup from capability type tag to kind, built once per collector.
#[derive(Debug, Clone)]
pub struct CapabilityTable {
    by_tag: HashMap<&'static str, CapabilityKind>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        let by_tag = CapabilityKind::KNOWN
            .iter()
            .map(|kind| (kind.tag(), *kind))
            .collect();
        Self { by_tag }
    }

    /// Kind for a type tag; tags are case-sensitive.
    pub fn lookup(&self, tag: &str) -> CapabilityKind {
        self.by_tag
            .get(tag)
            .copied()
            .unwrap_or(CapabilityKind::Unrecognized)
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::new()
    }
}
