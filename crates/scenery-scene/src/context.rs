//! Editor context handle passed to every node.

use scenery_core::{EditorConfig, EditorEvent, EventBus};
use scenery_media::{MediaResolver, VideoSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;

struct ContextInner {
    config: EditorConfig,
    events: EventBus,
    resolver: Arc<dyn MediaResolver>,
    video_source: Arc<dyn VideoSource>,
    playing: AtomicBool,
    runtime: Handle,
}

/// Shared services and state of one editor session. Cheap to clone.
#[derive(Clone)]
pub struct EditorContext {
    inner: Arc<ContextInner>,
}

impl EditorContext {
    /// Create a context. Async node work is spawned on `runtime`.
    pub fn new(
        config: EditorConfig,
        resolver: Arc<dyn MediaResolver>,
        video_source: Arc<dyn VideoSource>,
        runtime: Handle,
    ) -> Self {
        let events = EventBus::new(config.event_capacity);
        Self {
            inner: Arc::new(ContextInner {
                config,
                events,
                resolver,
                video_source,
                playing: AtomicBool::new(false),
                runtime,
            }),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Publish on the editor change-broadcast channel.
    pub fn publish(&self, event: EditorEvent) {
        self.inner.events.publish(event);
    }

    pub fn resolver(&self) -> &Arc<dyn MediaResolver> {
        &self.inner.resolver
    }

    pub fn video_source(&self) -> &Arc<dyn VideoSource> {
        &self.inner.video_source
    }

    /// Whether the editor is in play mode.
    pub fn is_playing(&self) -> bool {
        self.inner.playing.load(Ordering::SeqCst)
    }

    pub fn set_playing(&self, playing: bool) {
        self.inner.playing.store(playing, Ordering::SeqCst);
    }

    pub fn runtime(&self) -> &Handle {
        &self.inner.runtime
    }
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("config", &self.inner.config)
            .field("playing", &self.is_playing())
            .finish_non_exhaustive()
    }
}
