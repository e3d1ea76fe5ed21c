//! Core error types for ringtime-core.
//!
//! The gesture path never fails: rejected drag updates are reported as
//! values (see [`crate::drag::DragUpdate`]). These errors cover the
//! fallible edges around it -- configuration, task construction and I/O.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ringtime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Range is not contained in the ring's day
    #[error("Time range {start} - {end} lies outside {day}")]
    OutsideDay {
        start: NaiveDateTime,
        end: NaiveDateTime,
        day: NaiveDate,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
