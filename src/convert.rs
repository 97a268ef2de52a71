//! Unit conversions for raw thermostat readings.
//!
//! The API reports temperatures as integers in tenths of a degree
//! Fahrenheit (`705` is 70.5°F).

/// Convert a raw reading to degrees Fahrenheit.
pub fn fahrenheit(raw: i64) -> f64 {
    raw as f64 / 10.0
}

/// Convert a raw reading to degrees Celsius.
///
/// Evaluated exactly as `(raw / 10 - 32) * 5 / 9` so exported values stay
/// identical to earlier releases.
pub fn celsius(raw: i64) -> f64 {
    (raw as f64 / 10.0 - 32.0) * 5.0 / 9.0
}

/// 1.0 if any run-duration sample is positive, else 0.0.
pub fn is_thing_running(samples: &[i64]) -> f64 {
    if samples.iter().any(|&s| s > 0) {
        1.0
    } else {
        0.0
    }
}

/// 1.0 for true, 0.0 for false.
pub fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
