//! Error types for Scenery.

use thiserror::Error;

/// Main error type for Scenery operations.
#[derive(Error, Debug)]
pub enum SceneryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid property '{name}': {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SceneryError {
    /// Shorthand for an [`SceneryError::InvalidProperty`].
    pub fn invalid_property(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Scenery operations.
pub type Result<T> = std::result::Result<T, SceneryError>;
