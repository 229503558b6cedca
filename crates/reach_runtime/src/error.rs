//! Runtime errors

use reach_interact::InteractionError;
use thiserror::Error;

/// Errors raised while loading or setting up a session
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Interaction config could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] InteractionError),

    /// Session file could not be read
    #[error("Failed to read session {path}: {source}")]
    SessionIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Session file is not valid TOML
    #[error("Failed to parse session: {0}")]
    SessionParse(#[from] toml::de::Error),

    /// Session content is inconsistent
    #[error("Invalid session: {0}")]
    InvalidSession(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
