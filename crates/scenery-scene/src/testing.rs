//! Test doubles for exercising node lifecycles without real media.

use crate::context::EditorContext;
use async_trait::async_trait;
use parking_lot::Mutex;
use scenery_core::EditorConfig;
use scenery_media::{MediaMeta, MediaResolver, ProbeVideoSource, ResolutionError, ResolvedMedia};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
enum Route {
    Media { content_type: String, delay: Duration },
    Fail { reason: String, delay: Duration },
}

/// Resolver answering from a fixed table of URLs and counting calls.
///
/// Unknown URLs fail with [`ResolutionError::NotFound`].
#[derive(Default)]
pub struct ScriptedResolver {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `url` to itself with `content_type`.
    pub fn with_media(self, url: &str, content_type: &str) -> Self {
        self.with_delayed_media(url, content_type, Duration::ZERO)
    }

    /// Like [`Self::with_media`], answering after `delay`.
    pub fn with_delayed_media(self, url: &str, content_type: &str, delay: Duration) -> Self {
        self.routes.lock().insert(
            url.to_string(),
            Route::Media {
                content_type: content_type.to_string(),
                delay,
            },
        );
        self
    }

    /// Fail resolution of `url`.
    pub fn with_failure(self, url: &str, reason: &str) -> Self {
        self.with_delayed_failure(url, reason, Duration::ZERO)
    }

    /// Like [`Self::with_failure`], failing after `delay`.
    pub fn with_delayed_failure(self, url: &str, reason: &str, delay: Duration) -> Self {
        self.routes.lock().insert(
            url.to_string(),
            Route::Fail {
                reason: reason.to_string(),
                delay,
            },
        );
        self
    }

    /// Every URL passed to `resolve`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of `resolve` calls for `url`.
    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl MediaResolver for ScriptedResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, ResolutionError> {
        self.calls.lock().push(url.to_string());
        let route = self.routes.lock().get(url).cloned();

        match route {
            Some(Route::Media { content_type, delay }) => {
                tokio::time::sleep(delay).await;
                Ok(ResolvedMedia {
                    accessible_url: url.to_string(),
                    content_type,
                    meta: MediaMeta {
                        name: Some("Test Clip".into()),
                        author: Some("Scenery".into()),
                        ..MediaMeta::default()
                    },
                })
            }
            Some(Route::Fail { reason, delay }) => {
                tokio::time::sleep(delay).await;
                Err(ResolutionError::Request {
                    url: url.to_string(),
                    reason,
                })
            }
            None => Err(ResolutionError::NotFound(url.to_string())),
        }
    }

    fn unproxy(&self, original_url: &str, segment_url: &str) -> String {
        if segment_url.contains("://") {
            return segment_url.to_string();
        }
        match original_url.rsplit_once('/') {
            Some((base, _)) => format!("{}/{}", base, segment_url),
            None => segment_url.to_string(),
        }
    }
}

/// Editor context on the current tokio runtime with a probe video source.
pub fn test_context(resolver: Arc<dyn MediaResolver>) -> EditorContext {
    test_context_with(EditorConfig::default(), resolver)
}

/// Like [`test_context`] with an explicit config.
pub fn test_context_with(config: EditorConfig, resolver: Arc<dyn MediaResolver>) -> EditorContext {
    EditorContext::new(
        config,
        resolver,
        Arc::new(ProbeVideoSource::new().with_dimensions(1280, 720)),
        tokio::runtime::Handle::current(),
    )
}
