//! Error types for the detection engine and its capabilities.

use thiserror::Error;

/// Failure reported by a sentiment scoring capability.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// The scorer backend could not be reached or refused the input.
    #[error("sentiment scorer unavailable: {0}")]
    Unavailable(String),

    /// The scorer returned values outside their documented ranges.
    #[error("sentiment score out of range: {0}")]
    OutOfRange(String),
}

/// Failure reported by a text generation capability.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The generation backend could not be reached.
    #[error("text generator unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with no usable text.
    #[error("text generator returned an empty response")]
    Empty,
}

/// Errors that can occur while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Internal fault while computing mood-trend statistics.
#[derive(Debug, Error)]
pub enum TrendError {
    /// A statistic came out as NaN or infinite.
    #[error("non-finite {0} in mood history")]
    NonFinite(&'static str),
}
