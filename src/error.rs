//! Error types shared across the crate.

use thiserror::Error;

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    /// Creates a new configuration error for the given field path.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Rejection of invalid runtime input.
///
/// Out-of-range or non-finite inputs fail fast with one of these; they are
/// never silently coerced. State invariants (SoC bounds, discharge ceiling)
/// are not represented here: violating them is a bug and asserts instead.
#[derive(Debug, Error)]
pub enum InputError {
    /// An hour value outside the accepted `0..=24` input range.
    #[error("{field}: hour {value} is out of range (expected 0..=24)")]
    HourOutOfRange { field: &'static str, value: i64 },

    /// A numeric field that must be finite.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    /// A numeric field that must be non-negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f32 },

    /// A numeric field that must be strictly positive.
    #[error("{field} must be > 0, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A numeric field outside its closed range.
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },

    /// An hour listed more than once where hours must be unique.
    #[error("{field}: hour {hour} appears more than once")]
    DuplicateHour { field: &'static str, hour: usize },

    /// An empty interval where a non-empty one is required.
    #[error("{field}: start {start} must be before end {end}")]
    EmptyInterval {
        field: &'static str,
        start: usize,
        end: usize,
    },

    /// A weather file that could not be opened or parsed as CSV.
    #[error("cannot read weather file \"{path}\": {source}")]
    WeatherIo {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A weather file row with invalid contents.
    #[error("weather file \"{path}\", record {record}: {message}")]
    WeatherRecord {
        path: String,
        record: usize,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_includes_field_path() {
        let err = ConfigError::new("battery.capacity_kwh", "must be > 0");
        let text = err.to_string();
        assert!(text.contains("battery.capacity_kwh"));
        assert!(text.contains("must be > 0"));
    }

    #[test]
    fn input_error_display_names_the_field() {
        let err = InputError::NegativeValue {
            field: "threshold_kw",
            value: -1.0,
        };
        assert!(err.to_string().contains("threshold_kw"));
    }
}
