//! Video node load lifecycle against the real resolver and video source.

use scenery_core::{EditorConfig, EditorEvent, Severity};
use scenery_media::{LocalResolver, MediaResolver, ProbeVideoSource};
use scenery_scene::testing::{test_context, ScriptedResolver};
use scenery_scene::{EditorContext, LoadState, VideoNode, LOAD_ERROR_MESSAGE};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// ── Helpers ────────────────────────────────────────────────────

fn local_context(root: &Path, resolver: LocalResolver) -> EditorContext {
    let config = EditorConfig {
        media_root: root.to_path_buf(),
        ..EditorConfig::default()
    };
    EditorContext::new(
        config,
        Arc::new(resolver) as Arc<dyn MediaResolver>,
        Arc::new(ProbeVideoSource::new().with_duration(0.5)),
        tokio::runtime::Handle::current(),
    )
}

// ── Local files ────────────────────────────────────────────────

#[tokio::test]
async fn local_file_loads_and_seeks_within_duration() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    std::fs::write(tmp.path().join("short.webm"), b"").unwrap();
    let node = VideoNode::new(local_context(tmp.path(), LocalResolver::new(tmp.path())));

    node.load("short.webm", None).await;

    assert_eq!(node.load_state(), LoadState::Ready);
    // The preview seek is clamped to the half-second clip.
    assert_eq!(node.element().current_time(), 0.5);
    assert_eq!(node.attribution().as_deref(), Some("short.webm"));
    let scale = node.mesh().scale;
    assert!((scale.y - 1080.0 / 1920.0).abs() < 1e-6);
}

#[tokio::test]
async fn missing_local_file_shows_error() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let node = VideoNode::new(local_context(tmp.path(), LocalResolver::new(tmp.path())));

    node.load("gone.mp4", None).await;

    assert_eq!(node.load_state(), LoadState::Error);
    let issues = node.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    assert_eq!(issues[0].message, LOAD_ERROR_MESSAGE);
    assert!(node.is_error_icon_visible());
}

// ── Streaming ──────────────────────────────────────────────────

#[tokio::test]
async fn hls_through_proxy_fetches_direct_url() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let resolver = LocalResolver::new(tmp.path()).with_proxy("https://proxy.test/");
    let node = VideoNode::new(local_context(tmp.path(), resolver));

    node.load("https://cdn.test/live/index.m3u8", None).await;

    assert_eq!(node.load_state(), LoadState::Ready);
    assert_eq!(node.is_streaming(), Some(false));
    assert_eq!(
        node.element().src(),
        Some("https://cdn.test/live/index.m3u8")
    );
    assert_eq!(node.element().duration(), None);
}

// ── Races ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rapid_reassignment_settles_on_a_requested_source() {
    let resolver = Arc::new(
        ScriptedResolver::new()
            .with_delayed_media("https://cdn.test/a.mp4", "video/mp4", Duration::from_millis(30))
            .with_delayed_failure("https://cdn.test/b.mp4", "timeout", Duration::from_millis(10))
            .with_media("https://cdn.test/c.mp4", "video/mp4"),
    );
    let node = VideoNode::new(test_context(resolver.clone()));
    let mut rx = node.context().events().subscribe();

    let handles = [
        node.set_src("https://cdn.test/a.mp4"),
        node.set_src("https://cdn.test/b.mp4"),
        node.set_src("https://cdn.test/c.mp4"),
    ];
    for handle in handles {
        handle.await.expect("load task panicked");
    }

    assert!(matches!(node.load_state(), LoadState::Ready | LoadState::Error));
    assert!(!node.is_loading_placeholder_visible());
    assert!(node.src().starts_with("https://cdn.test/"));
    assert_eq!(resolver.calls().len(), 3);

    let mut object_events = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, EditorEvent::ObjectsChanged(_)) {
            object_events += 1;
        }
    }
    assert_eq!(object_events, 3);
}
