//! Error types for interaction setup
//!
//! Frame-time operations never fail: a missing hit, appearance or body is
//! simply skipped. Errors only surface while loading configuration.

use thiserror::Error;

/// Interaction system errors
#[derive(Debug, Error)]
pub enum InteractionError {
    /// Configuration file could not be read
    #[error("Failed to read interaction config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::InteractionConfig`]
    #[error("Failed to parse interaction config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values are out of range
    #[error("Invalid interaction configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for interaction setup
pub type Result<T> = std::result::Result<T, InteractionError>;
