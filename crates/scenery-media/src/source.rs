//! Attaching resolved media to a playback element.

use crate::error::MediaError;
use crate::hls::{is_hls, StreamAdapter};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Metadata of media that was successfully attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedVideo {
    /// The URL actually fetched (after any stream rewriting).
    pub fetch_url: String,
    pub width: u32,
    pub height: u32,
    /// Duration in seconds, `None` for live or unknown.
    pub duration: Option<f64>,
}

/// Decodes media and attaches it to a playback element.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Attach `url` of `content_type`. HLS sources come with their adapter.
    async fn attach(
        &self,
        url: &str,
        content_type: &str,
        stream: Option<Arc<dyn StreamAdapter>>,
    ) -> Result<AttachedVideo, MediaError>;
}

/// Video source that probes the container without a full decode.
///
/// Reports fixed frame dimensions until a real probe backend is wired in.
pub struct ProbeVideoSource {
    width: u32,
    height: u32,
    duration: f64,
}

impl ProbeVideoSource {
    pub fn new() -> Self {
        Self {
            width: 1920,
            height: 1080,
            duration: 10.0,
        }
    }

    /// Override the reported frame size.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Override the reported duration of progressive media.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }
}

impl Default for ProbeVideoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoSource for ProbeVideoSource {
    async fn attach(
        &self,
        url: &str,
        content_type: &str,
        stream: Option<Arc<dyn StreamAdapter>>,
    ) -> Result<AttachedVideo, MediaError> {
        let hls = is_hls(url, content_type);
        if !hls && !content_type.starts_with("video/") {
            return Err(MediaError::UnsupportedFormat(content_type.to_string()));
        }

        let remote = url.starts_with("http://") || url.starts_with("https://");
        if !remote && !Path::new(url).exists() {
            return Err(MediaError::Attach(format!("File not found: {}", url)));
        }

        let fetch_url = match &stream {
            Some(stream) => stream.segment_url(url),
            None => url.to_string(),
        };

        info!(url = %fetch_url, content_type, hls, "Attached video");
        Ok(AttachedVideo {
            fetch_url,
            width: self.width,
            height: self.height,
            duration: if hls { None } else { Some(self.duration) },
        })
    }
}
