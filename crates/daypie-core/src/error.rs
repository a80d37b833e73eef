//! Core error types for daypie-core.
//!
//! Geometry and slice building never fail. Errors only surface at the edges:
//! parsing event payloads handed over by the data layer, and loading or
//! saving the dial configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for daypie-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors raised while normalizing event payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Timestamp could not be parsed as RFC 3339 or a naive local date-time
    #[error("Invalid timestamp for '{field}' of event '{event_id}': {value}")]
    InvalidTimestamp {
        event_id: String,
        field: &'static str,
        value: String,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
