//! Error types
//!
//! Only whole-call failures are errors. Records that match nothing, empty
//! material slots and out-of-range channels are handled in place.

use thiserror::Error;

/// Preset loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PresetError {
    /// Preset file could not be read
    #[error("Failed to read preset: {0}")]
    Io(#[from] std::io::Error),
    /// Preset data is not a valid record set
    #[error("Failed to parse preset: {0}")]
    Parse(#[from] serde_json::Error),
    /// Preset data was empty or blank
    #[error("Preset data is empty")]
    Empty,
}

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed: {0}")]
    Validation(String),
}

/// Scene construction error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SceneError {
    #[error("No scene node with index {0}")]
    UnknownNode(usize),
}
