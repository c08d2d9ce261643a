//! Playback element state for a video node.

use crate::source::AttachedVideo;
use tracing::debug;

/// The media element a video node plays through.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoElement {
    src: Option<String>,
    paused: bool,
    current_time: f64,
    duration: Option<f64>,
    looping: bool,
}

impl VideoElement {
    /// Create an empty, paused element.
    pub fn new() -> Self {
        Self {
            src: None,
            paused: true,
            current_time: 0.0,
            duration: None,
            looping: false,
        }
    }

    /// Point the element at freshly attached media.
    pub fn attach(&mut self, video: &AttachedVideo) {
        self.src = Some(video.fetch_url.clone());
        self.duration = video.duration;
        self.current_time = 0.0;
    }

    /// Start playback.
    pub fn play(&mut self) {
        self.paused = false;
        debug!(src = ?self.src, "Video element playing");
    }

    /// Pause playback, keeping the current position.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Seek, clamped to the known duration.
    pub fn seek(&mut self, time: f64) {
        let time = time.max(0.0);
        self.current_time = match self.duration {
            Some(duration) => time.min(duration),
            None => time,
        };
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Media duration in seconds, when known. Live streams report none.
    pub fn duration(&self) -> Option<f64> {
        self.duration.filter(|d| *d > 0.0)
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}

impl Default for VideoElement {
    fn default() -> Self {
        Self::new()
    }
}
