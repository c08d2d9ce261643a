//! Error types for media loading.

use thiserror::Error;

/// A source URL could not be turned into a fetchable asset.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The URL is empty or malformed.
    #[error("Invalid media URL: '{0}'")]
    InvalidUrl(String),

    /// Nothing exists at the resolved location.
    #[error("Media not found: {0}")]
    NotFound(String),

    /// The resolver backend failed.
    #[error("Media resolution failed for {url}: {reason}")]
    Request { url: String, reason: String },
}

/// The resolved media could not be attached to the playback element.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unsupported content type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to attach video: {0}")]
    Attach(String),
}

/// Underlying cause of a [`LoadError`].
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Contextual error raised when a video node fails to load its source.
#[derive(Debug, Error)]
#[error("Error loading video {url}")]
pub struct LoadError {
    /// The canonical URL that failed.
    pub url: String,
    #[source]
    pub source: LoadFailure,
}

impl LoadError {
    pub fn new(url: impl Into<String>, source: impl Into<LoadFailure>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}
