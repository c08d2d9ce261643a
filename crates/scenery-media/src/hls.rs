//! HLS detection and the stream adapter used for adaptive sources.

use crate::resolver::MediaResolver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// True if `src`/`content_type` describe an HLS stream.
pub fn is_hls(src: &str, content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    if content_type.starts_with("application/x-mpegurl")
        || content_type.starts_with("application/vnd.apple.mpegurl")
    {
        return true;
    }

    src.to_ascii_lowercase().find(".m3u8").is_some_and(|idx| idx > 0)
}

/// Segment loader for adaptive-streaming sources.
pub trait StreamAdapter: Send + Sync {
    /// Resume fetching segments.
    fn start_load(&self);

    /// Stop fetching further segments.
    fn stop_load(&self);

    /// Whether segments are currently being fetched.
    fn is_loading(&self) -> bool;

    /// URL to fetch for a playlist/segment request.
    fn segment_url(&self, url: &str) -> String;
}

/// HLS adapter that routes every request through the resolver's un-proxy step.
pub struct HlsStreamAdapter {
    source_url: String,
    resolver: Arc<dyn MediaResolver>,
    loading: AtomicBool,
}

impl HlsStreamAdapter {
    /// Create an adapter for `source_url`. Loading starts immediately.
    pub fn new(source_url: impl Into<String>, resolver: Arc<dyn MediaResolver>) -> Self {
        Self {
            source_url: source_url.into(),
            resolver,
            loading: AtomicBool::new(true),
        }
    }

    /// The canonical URL this adapter streams.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

impl StreamAdapter for HlsStreamAdapter {
    fn start_load(&self) {
        self.loading.store(true, Ordering::SeqCst);
        debug!(url = %self.source_url, "HLS segment loading started");
    }

    fn stop_load(&self) {
        self.loading.store(false, Ordering::SeqCst);
        debug!(url = %self.source_url, "HLS segment loading stopped");
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn segment_url(&self, url: &str) -> String {
        self.resolver.unproxy(&self.source_url, url)
    }
}
