//! Video node: a media element with spatial audio rendered onto a mesh.
//!
//! The node is a cheap-clone handle over shared state. Loading is async and
//! re-entrant: any number of `load` calls may be in flight at once and the
//! state lock is never held across an await, so a superseded load still runs
//! to completion and performs its writes. The only guard is the
//! identical-URL short-circuit.

use crate::audio_params::{AudioParams, AudioType, DistanceModel};
use crate::components::{
    BillboardComponent, LinkComponent, NetworkedComponent, VideoComponent, VideoNodeComponents,
    AUDIO_PARAMS, BILLBOARD, LINK, NETWORKED, VIDEO,
};
use crate::context::EditorContext;
use crate::description::{DescriptionError, NodeDescription};
use crate::export::ExportComponents;
use crate::node::{EditorNode, SceneNode, Transform};
use crate::property::PropertyValue;
use parking_lot::Mutex;
use scenery_core::{EditorEvent, Issue, Result, SceneryError};
use scenery_media::{
    is_hls, object_perf_issues, HlsStreamAdapter, LoadError, LoadFailure, MediaMeta, Projection,
    RuntimeResources, StreamAdapter, TextureHandle, VideoElement, VideoMesh,
};
use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Called when a load fails, with the node and the contextual error.
pub type ErrorCallback = Arc<dyn Fn(&VideoNode, &LoadError) + Send + Sync>;

/// User-facing message for any failed load.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading video.";

/// Where the node is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Result of the most recent load to finish.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Ready(VideoMesh),
    Errored(Issue),
}

#[derive(Clone)]
struct VideoNodeState {
    base: SceneNode,
    canonical_url: String,
    controls: bool,
    auto_play: bool,
    looping: bool,
    projection: Projection,
    audio: AudioParams,
    billboard: bool,
    href: String,
    issues: Vec<Issue>,
    load_state: LoadState,
    outcome: Option<LoadOutcome>,
    meta: Option<MediaMeta>,
    attribution: Option<String>,
    element: VideoElement,
    mesh: VideoMesh,
    stream: Option<Arc<HlsStreamAdapter>>,
    loading_placeholder: bool,
    error_icon: bool,
}

impl VideoNodeState {
    fn new(base: SceneNode) -> Self {
        Self {
            base,
            canonical_url: String::new(),
            controls: true,
            auto_play: true,
            looping: false,
            projection: Projection::Flat,
            audio: AudioParams::default(),
            billboard: false,
            href: String::new(),
            issues: Vec::new(),
            load_state: LoadState::Idle,
            outcome: None,
            meta: None,
            attribution: None,
            element: VideoElement::new(),
            mesh: VideoMesh::new(),
            stream: None,
            loading_placeholder: false,
            error_icon: false,
        }
    }

    fn video_component(&self) -> VideoComponent {
        VideoComponent {
            src: self.canonical_url.clone(),
            controls: self.controls,
            auto_play: self.auto_play,
            looping: self.looping,
            projection: self.projection,
        }
    }

    fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.mesh.projection = projection;
        self.mesh.fit_to_texture();
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        self.element.set_looping(looping);
    }
}

/// Scene-graph node wrapping a video element with spatial audio.
#[derive(Clone)]
pub struct VideoNode {
    ctx: EditorContext,
    state: Arc<Mutex<VideoNodeState>>,
}

impl VideoNode {
    pub const NODE_NAME: &'static str = "Video";

    /// Create a node with default settings and no source.
    pub fn new(ctx: EditorContext) -> Self {
        Self::with_base(ctx, SceneNode::new(Self::NODE_NAME))
    }

    fn with_base(ctx: EditorContext, base: SceneNode) -> Self {
        Self {
            ctx,
            state: Arc::new(Mutex::new(VideoNodeState::new(base))),
        }
    }

    // ── Load lifecycle ─────────────────────────────────────────

    /// Load `src` into the node.
    ///
    /// Never fails: a broken source leaves the node showing its error icon
    /// with an error issue, reports through `on_error` and the log, and the
    /// change events are still published.
    pub async fn load(&self, src: &str, on_error: Option<ErrorCallback>) -> VideoNode {
        {
            let mut state = self.state.lock();
            if !src.is_empty() && src == state.canonical_url {
                debug!(node = %state.base.uuid, url = src, "Source unchanged, skipping load");
                return self.clone();
            }

            state.canonical_url = src.to_string();
            state.issues.clear();
            state.mesh.visible = false;
            state.error_icon = false;
            state.loading_placeholder = true;
            state.load_state = LoadState::Loading;
            if self.ctx.is_playing() {
                state.element.pause();
            }
            debug!(node = %state.base.uuid, url = src, "Loading video");
        }

        if let Err(failure) = self.resolve_and_attach(src).await {
            self.fail_load(LoadError::new(src, failure), on_error.as_ref());
        }

        let uuid = self.uuid();
        self.ctx.publish(EditorEvent::ObjectsChanged(vec![uuid]));
        self.ctx.publish(EditorEvent::SelectionChanged);
        self.state.lock().loading_placeholder = false;

        self.clone()
    }

    async fn resolve_and_attach(&self, src: &str) -> std::result::Result<(), LoadFailure> {
        let resolved = self.ctx.resolver().resolve(src).await?;

        let stream = is_hls(src, &resolved.content_type)
            .then(|| Arc::new(HlsStreamAdapter::new(src, Arc::clone(self.ctx.resolver()))));
        {
            let mut state = self.state.lock();
            state.attribution = resolved.meta.attribution();
            state.meta = Some(resolved.meta.clone());
            state.stream = stream.clone();
        }

        let adapter = stream
            .clone()
            .map(|s| s as Arc<dyn StreamAdapter>);
        let video = self
            .ctx
            .video_source()
            .attach(&resolved.accessible_url, &resolved.content_type, adapter)
            .await?;

        let mut state = self.state.lock();
        state.element.attach(&video);
        state.mesh.replace_texture(TextureHandle::new(video.width, video.height));
        state.mesh.visible = true;

        match &stream {
            // Single-frame preview: don't keep prefetching segments.
            Some(stream) => stream.stop_load(),
            // Show a representative frame rather than the (often black) first one.
            None if state.element.duration().is_some() => state.element.seek(1.0),
            None => {}
        }

        if self.ctx.is_playing() && state.auto_play {
            state.element.play();
        }

        state.issues = object_perf_issues(&state.mesh, self.ctx.config().max_texture_size);
        state.load_state = LoadState::Ready;
        state.outcome = Some(LoadOutcome::Ready(state.mesh.clone()));

        info!(node = %state.base.uuid, url = src, hls = stream.is_some(), "Video ready");
        Ok(())
    }

    fn fail_load(&self, err: LoadError, on_error: Option<&ErrorCallback>) {
        self.state.lock().error_icon = true;

        if let Some(callback) = on_error {
            callback(self, &err);
        }

        error!(node = %self.uuid(), url = %err.url, cause = %err.source, "{}", err);

        let issue = Issue::error(LOAD_ERROR_MESSAGE);
        let mut state = self.state.lock();
        state.issues.push(issue.clone());
        state.load_state = LoadState::Error;
        state.outcome = Some(LoadOutcome::Errored(issue));
    }

    /// Assign a new source. The load runs on the editor runtime.
    pub fn set_src(&self, src: impl Into<String>) -> JoinHandle<VideoNode> {
        let node = self.clone();
        let src = src.into();
        self.ctx
            .runtime()
            .spawn(async move { node.load(&src, None).await })
    }

    // ── Serialization ──────────────────────────────────────────

    /// Rebuild a node from its persisted description.
    ///
    /// The source load and the assignment of playback and audio settings run
    /// as one task registered on `load_tasks`.
    pub fn deserialize(
        ctx: &EditorContext,
        description: &NodeDescription,
        load_tasks: &mut JoinSet<()>,
        on_error: Option<ErrorCallback>,
    ) -> std::result::Result<VideoNode, DescriptionError> {
        let base = SceneNode::deserialize(description)?;
        let components = VideoNodeComponents::from_description(description)?;
        let node = VideoNode::with_base(ctx.clone(), base);

        {
            let mut state = node.state.lock();
            state.billboard = components.billboard.is_some();
            if let Some(link) = &components.link {
                state.href = link.href.clone();
            }
        }

        let task_node = node.clone();
        let VideoNodeComponents {
            video, audio_params, ..
        } = components;
        load_tasks.spawn_on(
            async move {
                task_node.load(&video.src, on_error).await;
                task_node.apply_settings(&video, &audio_params);
            },
            ctx.runtime(),
        );

        Ok(node)
    }

    fn apply_settings(&self, video: &VideoComponent, audio: &AudioParams) {
        let mut state = self.state.lock();
        state.controls = video.controls;
        state.auto_play = video.auto_play;
        state.set_looping(video.looping);
        state.set_projection(video.projection);
        state.audio = audio.clone();
    }

    /// Persisted description of the node.
    pub fn serialize(&self) -> std::result::Result<NodeDescription, DescriptionError> {
        let state = self.state.lock();
        let components = VideoNodeComponents {
            video: state.video_component(),
            audio_params: state.audio.clone(),
            billboard: state.billboard.then_some(BillboardComponent {}),
            link: (!state.href.is_empty()).then(|| LinkComponent {
                href: state.href.clone(),
            }),
        };
        state.base.serialize(components.to_blocks()?)
    }

    /// Components for the exported scene.
    ///
    /// Billboard and link only apply to flat video and are dropped for other
    /// projections.
    pub fn prepare_for_export(&self) -> std::result::Result<ExportComponents, DescriptionError> {
        let state = self.state.lock();
        let mut export = ExportComponents::new();
        state.base.prepare_for_export(&mut export)?;

        export.add(VIDEO, &state.video_component())?;
        export.add(NETWORKED, &NetworkedComponent { id: state.base.uuid })?;

        let flat = state.projection == Projection::Flat;
        if state.billboard && flat {
            export.add(BILLBOARD, &BillboardComponent {})?;
        }
        if !state.href.is_empty() && flat {
            export.add(LINK, &LinkComponent { href: state.href.clone() })?;
        }

        export.add(AUDIO_PARAMS, &state.audio.for_export())?;
        Ok(export)
    }

    // ── Copy / clone ───────────────────────────────────────────

    /// Copy `source` onto this node: the scene node, playback and audio
    /// settings, the loaded media and the billboard and link flags.
    ///
    /// The media is taken over as-is, without reloading. This node keeps its
    /// own mesh and material ids.
    pub fn copy_from(&self, source: &VideoNode) -> &Self {
        if Arc::ptr_eq(&self.state, &source.state) {
            return self;
        }

        let src = source.state.lock().clone();

        let mut state = self.state.lock();
        state.base.copy_from(&src.base);
        state.canonical_url = src.canonical_url;
        state.controls = src.controls;
        state.auto_play = src.auto_play;
        state.audio = src.audio;
        state.billboard = src.billboard;
        state.href = src.href;

        state.element = src.element;
        state.set_looping(src.looping);
        state.mesh.visible = src.mesh.visible;
        state.mesh.texture = src.mesh.texture;
        state.set_projection(src.projection);

        state.meta = src.meta;
        state.attribution = src.attribution;
        state.stream = src.stream;
        state.issues = src.issues;
        state.load_state = src.load_state;
        state.outcome = match src.outcome {
            Some(LoadOutcome::Ready(_)) => Some(LoadOutcome::Ready(state.mesh.clone())),
            other => other,
        };
        state.loading_placeholder = src.loading_placeholder;
        state.error_icon = src.error_icon;
        self
    }

    /// A new node in the same editor with this node's copyable settings.
    pub fn clone_node(&self) -> VideoNode {
        let node = VideoNode::new(self.ctx.clone());
        node.copy_from(self);
        node
    }

    /// Resources retained for memory accounting, if media is loaded.
    pub fn runtime_resources_for_stats(&self) -> Option<RuntimeResources> {
        self.state.lock().mesh.runtime_resources()
    }

    // ── Editor hooks ───────────────────────────────────────────

    /// The editor entered play mode.
    pub fn on_play(&self) {
        let mut state = self.state.lock();
        if state.auto_play {
            state.element.play();
        }
    }

    /// The editor left play mode.
    pub fn on_pause(&self) {
        let mut state = self.state.lock();
        state.element.pause();
        state.element.seek(0.0);
    }

    /// A property changed; refit the mesh.
    pub fn on_change(&self) {
        self.state.lock().mesh.fit_to_texture();
    }

    // ── Field-indexed property access ──────────────────────────

    /// Current value of the field called `name`, if the node has one.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        let state = self.state.lock();
        let audio = &state.audio;
        let value = match name {
            "src" => PropertyValue::Text(state.canonical_url.clone()),
            "controls" => PropertyValue::Bool(state.controls),
            "autoPlay" => PropertyValue::Bool(state.auto_play),
            "loop" => PropertyValue::Bool(state.looping),
            "projection" => PropertyValue::Projection(state.projection),
            "billboard" => PropertyValue::Bool(state.billboard),
            "href" => PropertyValue::Text(state.href.clone()),
            "audioType" => PropertyValue::AudioType(audio.audio_type),
            "gain" => PropertyValue::Number(audio.gain),
            "distanceModel" => PropertyValue::DistanceModel(audio.distance_model),
            "rolloffFactor" => PropertyValue::Number(audio.rolloff_factor),
            "refDistance" => PropertyValue::Number(audio.ref_distance),
            "maxDistance" => PropertyValue::Number(audio.max_distance),
            "coneInnerAngle" => PropertyValue::Number(audio.cone_inner_angle),
            "coneOuterAngle" => PropertyValue::Number(audio.cone_outer_angle),
            "coneOuterGain" => PropertyValue::Number(audio.cone_outer_gain),
            _ => return None,
        };
        Some(value)
    }

    /// Set the field called `name`. Setting `src` starts a load.
    pub fn set_property(&self, name: &str, value: &PropertyValue) -> Result<()> {
        if name == "src" {
            self.set_src(value.as_text(name)?);
            return Ok(());
        }

        let mut state = self.state.lock();
        match name {
            "controls" => state.controls = value.as_bool(name)?,
            "autoPlay" => state.auto_play = value.as_bool(name)?,
            "loop" => state.set_looping(value.as_bool(name)?),
            "projection" => state.set_projection(value.as_projection(name)?),
            "billboard" => state.billboard = value.as_bool(name)?,
            "href" => state.href = value.as_text(name)?,
            "audioType" => state.audio.audio_type = value.as_audio_type(name)?,
            "distanceModel" => state.audio.distance_model = value.as_distance_model(name)?,
            "gain" => state.audio.gain = value.as_number(name)?,
            "rolloffFactor" => state.audio.rolloff_factor = value.as_number(name)?,
            "refDistance" => state.audio.ref_distance = value.as_number(name)?,
            "maxDistance" => state.audio.max_distance = value.as_number(name)?,
            "coneInnerAngle" => state.audio.cone_inner_angle = value.as_number(name)?,
            "coneOuterAngle" => state.audio.cone_outer_angle = value.as_number(name)?,
            "coneOuterGain" => state.audio.cone_outer_gain = value.as_number(name)?,
            _ => return Err(SceneryError::invalid_property(name, "no such field on video node")),
        }
        state.audio = state.audio.sanitized();
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn uuid(&self) -> Uuid {
        self.state.lock().base.uuid
    }

    pub fn name(&self) -> String {
        self.state.lock().base.name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state.lock().base.name = name.into();
    }

    pub fn transform(&self) -> Transform {
        self.state.lock().base.transform
    }

    pub fn set_transform(&self, transform: Transform) {
        self.state.lock().base.transform = transform;
    }

    /// The canonical source URL; empty when unset.
    pub fn src(&self) -> String {
        self.state.lock().canonical_url.clone()
    }

    pub fn controls(&self) -> bool {
        self.state.lock().controls
    }

    pub fn set_controls(&self, controls: bool) {
        self.state.lock().controls = controls;
    }

    pub fn auto_play(&self) -> bool {
        self.state.lock().auto_play
    }

    pub fn set_auto_play(&self, auto_play: bool) {
        self.state.lock().auto_play = auto_play;
    }

    pub fn looping(&self) -> bool {
        self.state.lock().looping
    }

    pub fn set_looping(&self, looping: bool) {
        self.state.lock().set_looping(looping);
    }

    pub fn projection(&self) -> Projection {
        self.state.lock().projection
    }

    pub fn set_projection(&self, projection: Projection) {
        self.state.lock().set_projection(projection);
    }

    pub fn audio_params(&self) -> AudioParams {
        self.state.lock().audio.clone()
    }

    pub fn set_audio_params(&self, params: AudioParams) {
        self.state.lock().audio = params.sanitized();
    }

    pub fn audio_type(&self) -> AudioType {
        self.state.lock().audio.audio_type
    }

    pub fn distance_model(&self) -> DistanceModel {
        self.state.lock().audio.distance_model
    }

    pub fn billboard(&self) -> bool {
        self.state.lock().billboard
    }

    pub fn set_billboard(&self, billboard: bool) {
        self.state.lock().billboard = billboard;
    }

    pub fn href(&self) -> String {
        self.state.lock().href.clone()
    }

    pub fn set_href(&self, href: impl Into<String>) {
        self.state.lock().href = href.into();
    }

    /// Diagnostics from the last load.
    pub fn issues(&self) -> Vec<Issue> {
        self.state.lock().issues.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.lock().load_state
    }

    pub fn outcome(&self) -> Option<LoadOutcome> {
        self.state.lock().outcome.clone()
    }

    pub fn meta(&self) -> Option<MediaMeta> {
        self.state.lock().meta.clone()
    }

    pub fn attribution(&self) -> Option<String> {
        self.state.lock().attribution.clone()
    }

    pub fn mesh(&self) -> VideoMesh {
        self.state.lock().mesh.clone()
    }

    pub fn element(&self) -> VideoElement {
        self.state.lock().element.clone()
    }

    /// Whether the current source streams through an HLS adapter that is
    /// still fetching segments.
    pub fn is_streaming(&self) -> Option<bool> {
        self.state.lock().stream.as_ref().map(|s| s.is_loading())
    }

    pub fn is_error_icon_visible(&self) -> bool {
        self.state.lock().error_icon
    }

    pub fn is_loading_placeholder_visible(&self) -> bool {
        self.state.lock().loading_placeholder
    }
}

impl EditorNode for VideoNode {
    fn node_name(&self) -> &'static str {
        Self::NODE_NAME
    }

    fn uuid(&self) -> Uuid {
        VideoNode::uuid(self)
    }

    fn serialize(&self) -> std::result::Result<NodeDescription, DescriptionError> {
        VideoNode::serialize(self)
    }

    fn prepare_for_export(&self) -> std::result::Result<ExportComponents, DescriptionError> {
        VideoNode::prepare_for_export(self)
    }
}

impl std::fmt::Debug for VideoNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("VideoNode")
            .field("uuid", &state.base.uuid)
            .field("src", &state.canonical_url)
            .field("load_state", &state.load_state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{TRANSFORM, VISIBLE};
    use crate::testing::{test_context, ScriptedResolver};
    use scenery_core::Severity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::broadcast;

    const CLIP: &str = "https://cdn.test/clip.mp4";
    const OTHER: &str = "https://cdn.test/other.mp4";
    const LIVE: &str = "https://cdn.test/live/index.m3u8";
    const BROKEN: &str = "https://cdn.test/broken.mp4";

    fn resolver() -> Arc<ScriptedResolver> {
        Arc::new(
            ScriptedResolver::new()
                .with_media(CLIP, "video/mp4")
                .with_media(OTHER, "video/mp4")
                .with_media(LIVE, "application/vnd.apple.mpegurl")
                .with_failure(BROKEN, "503 from upstream"),
        )
    }

    fn drain(rx: &mut broadcast::Receiver<EditorEvent>) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    async fn join_all(tasks: &mut JoinSet<()>) {
        while let Some(result) = tasks.join_next().await {
            result.expect("load task panicked");
        }
    }

    #[tokio::test]
    async fn test_load_ready() {
        let resolver = resolver();
        let node = VideoNode::new(test_context(resolver.clone()));
        let mut rx = node.context().events().subscribe();

        node.load(CLIP, None).await;

        assert_eq!(node.src(), CLIP);
        assert_eq!(node.load_state(), LoadState::Ready);
        assert!(matches!(node.outcome(), Some(LoadOutcome::Ready(_))));
        assert!(node.mesh().visible);
        assert!(!node.is_error_icon_visible());
        assert!(!node.is_loading_placeholder_visible());
        assert!(node.issues().is_empty());
        assert_eq!(node.element().current_time(), 1.0);
        assert_eq!(node.attribution().as_deref(), Some("Test Clip by Scenery"));
        assert_eq!(node.is_streaming(), None);

        assert_eq!(
            drain(&mut rx),
            vec![
                EditorEvent::ObjectsChanged(vec![node.uuid()]),
                EditorEvent::SelectionChanged,
            ]
        );
    }

    #[tokio::test]
    async fn test_same_source_loads_once() {
        let resolver = resolver();
        let node = VideoNode::new(test_context(resolver.clone()));

        node.load(CLIP, None).await;
        let mesh_before = node.mesh();
        let mut rx = node.context().events().subscribe();

        node.load(CLIP, None).await;

        assert_eq!(resolver.call_count(CLIP), 1);
        assert!(drain(&mut rx).is_empty());
        assert_eq!(node.mesh(), mesh_before);
        assert_eq!(node.load_state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_empty_source_never_short_circuits() {
        let resolver = resolver();
        let node = VideoNode::new(test_context(resolver.clone()));
        let mut rx = node.context().events().subscribe();

        node.load("", None).await;
        node.load("", None).await;

        assert_eq!(resolver.call_count(""), 2);
        assert_eq!(drain(&mut rx).len(), 4);
        assert_eq!(node.src(), "");
        assert_eq!(node.issues().len(), 1);
    }

    #[tokio::test]
    async fn test_resolution_failure_is_contained() {
        let resolver = resolver();
        let node = VideoNode::new(test_context(resolver));
        let mut rx = node.context().events().subscribe();

        let reported = Arc::new(Mutex::new(Vec::<(Uuid, String)>::new()));
        let sink = reported.clone();
        let on_error: ErrorCallback = Arc::new(move |node: &VideoNode, err: &LoadError| {
            sink.lock().push((node.uuid(), err.to_string()));
        });

        node.load(BROKEN, Some(on_error)).await;

        let issues = node.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].message, LOAD_ERROR_MESSAGE);
        assert!(node.is_error_icon_visible());
        assert!(!node.is_loading_placeholder_visible());
        assert!(!node.mesh().visible);
        assert_eq!(node.load_state(), LoadState::Error);
        assert_eq!(node.src(), BROKEN);

        let reported = reported.lock();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].0, node.uuid());
        assert_eq!(reported[0].1, format!("Error loading video {}", BROKEN));

        // Completion still broadcasts.
        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[tokio::test]
    async fn test_attach_failure_is_contained() {
        let resolver = Arc::new(ScriptedResolver::new().with_media(CLIP, "image/png"));
        let node = VideoNode::new(test_context(resolver));

        node.load(CLIP, None).await;

        assert_eq!(node.load_state(), LoadState::Error);
        assert_eq!(node.issues(), vec![Issue::error(LOAD_ERROR_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_retry_after_failure_clears_issues() {
        let node = VideoNode::new(test_context(resolver()));

        node.load(BROKEN, None).await;
        assert!(node.is_error_icon_visible());

        node.load(CLIP, None).await;
        assert!(!node.is_error_icon_visible());
        assert!(node.issues().is_empty());
        assert_eq!(node.load_state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_hls_stops_prefetch_after_attach() {
        let node = VideoNode::new(test_context(resolver()));

        node.load(LIVE, None).await;

        assert_eq!(node.load_state(), LoadState::Ready);
        assert_eq!(node.is_streaming(), Some(false));
        assert_eq!(node.element().current_time(), 0.0);
        assert_eq!(node.element().src(), Some(LIVE));
    }

    #[tokio::test]
    async fn test_autoplay_only_in_play_mode() {
        let node = VideoNode::new(test_context(resolver()));
        node.load(CLIP, None).await;
        assert!(node.element().is_paused());

        node.context().set_playing(true);
        node.load(OTHER, None).await;
        assert!(!node.element().is_paused());

        node.set_auto_play(false);
        node.load(CLIP, None).await;
        assert!(node.element().is_paused());
    }

    #[tokio::test]
    async fn test_play_pause_hooks() {
        let node = VideoNode::new(test_context(resolver()));
        node.load(CLIP, None).await;

        node.on_play();
        assert!(!node.element().is_paused());

        node.on_pause();
        assert!(node.element().is_paused());
        assert_eq!(node.element().current_time(), 0.0);
    }

    #[tokio::test]
    async fn test_concurrent_loads_do_not_corrupt() {
        let resolver = Arc::new(
            ScriptedResolver::new()
                .with_delayed_media(CLIP, "video/mp4", Duration::from_millis(40))
                .with_media(OTHER, "video/mp4"),
        );
        let node = VideoNode::new(test_context(resolver.clone()));

        let slow = tokio::spawn({
            let node = node.clone();
            async move { node.load(CLIP, None).await }
        });
        tokio::task::yield_now().await;
        let fast = tokio::spawn({
            let node = node.clone();
            async move { node.load(OTHER, None).await }
        });

        slow.await.expect("slow load panicked");
        fast.await.expect("fast load panicked");

        assert_eq!(resolver.call_count(CLIP), 1);
        assert_eq!(resolver.call_count(OTHER), 1);
        assert!([CLIP, OTHER].contains(&node.src().as_str()));
        assert_eq!(node.load_state(), LoadState::Ready);
        assert!(!node.is_loading_placeholder_visible());
        assert!(node.runtime_resources_for_stats().is_some());
    }

    #[tokio::test]
    async fn test_set_src_loads_on_runtime() {
        let resolver = resolver();
        let node = VideoNode::new(test_context(resolver.clone()));

        node.set_src(CLIP).await.expect("load task panicked");

        assert_eq!(node.src(), CLIP);
        assert_eq!(resolver.call_count(CLIP), 1);
    }

    #[tokio::test]
    async fn test_serialize_optional_blocks() {
        let node = VideoNode::new(test_context(resolver()));
        let names = |desc: &NodeDescription| -> Vec<String> {
            desc.components.iter().map(|c| c.name.clone()).collect()
        };

        let desc = node.serialize().unwrap();
        assert_eq!(names(&desc), vec![TRANSFORM, VISIBLE, VIDEO, AUDIO_PARAMS]);

        node.set_billboard(true);
        node.set_href("https://hubs.test/room");
        node.set_projection(Projection::Equirectangular);
        let desc = node.serialize().unwrap();
        assert!(desc.has_component(BILLBOARD));
        assert_eq!(
            desc.component(LINK).unwrap().props["href"],
            "https://hubs.test/room"
        );
    }

    #[tokio::test]
    async fn test_serialize_deserialize_roundtrip() {
        let ctx = test_context(resolver());
        let node = VideoNode::new(ctx.clone());
        node.load(CLIP, None).await;
        node.set_controls(false);
        node.set_auto_play(false);
        node.set_looping(true);
        node.set_projection(Projection::Equirectangular);
        node.set_billboard(true);
        node.set_href("https://hubs.test/room");
        node.set_audio_params(AudioParams {
            audio_type: AudioType::Stereo,
            gain: 1.5,
            distance_model: DistanceModel::Exponential,
            rolloff_factor: 2.0,
            ref_distance: 3.0,
            max_distance: 50.0,
            cone_inner_angle: 90.0,
            cone_outer_angle: 180.0,
            cone_outer_gain: 0.25,
        });

        let desc = node.serialize().unwrap();
        let mut tasks = JoinSet::new();
        let loaded = VideoNode::deserialize(&ctx, &desc, &mut tasks, None).unwrap();
        join_all(&mut tasks).await;

        assert_eq!(loaded.uuid(), node.uuid());
        assert_eq!(loaded.src(), CLIP);
        assert!(!loaded.controls());
        assert!(!loaded.auto_play());
        assert!(loaded.looping());
        assert_eq!(loaded.projection(), Projection::Equirectangular);
        assert_eq!(loaded.audio_params(), node.audio_params());
        assert!(loaded.billboard());
        assert_eq!(loaded.href(), "https://hubs.test/room");
        assert_eq!(loaded.load_state(), LoadState::Ready);
        assert_eq!(loaded.serialize().unwrap(), desc);
    }

    #[tokio::test]
    async fn test_deserialize_without_optional_blocks() {
        let ctx = test_context(resolver());
        let desc = VideoNode::new(ctx.clone()).serialize().unwrap();

        let mut tasks = JoinSet::new();
        let loaded = VideoNode::deserialize(&ctx, &desc, &mut tasks, None).unwrap();
        join_all(&mut tasks).await;

        assert!(!loaded.billboard());
        assert_eq!(loaded.href(), "");
    }

    #[tokio::test]
    async fn test_deserialize_reports_load_errors() {
        let ctx = test_context(resolver());
        let node = VideoNode::new(ctx.clone());
        node.load(BROKEN, None).await;
        let desc = node.serialize().unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let on_error: ErrorCallback = Arc::new(move |_: &VideoNode, _: &LoadError| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let mut tasks = JoinSet::new();
        let loaded = VideoNode::deserialize(&ctx, &desc, &mut tasks, Some(on_error)).unwrap();
        join_all(&mut tasks).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(loaded.load_state(), LoadState::Error);
    }

    #[tokio::test]
    async fn test_deserialize_requires_components() {
        let ctx = test_context(resolver());
        let mut desc = VideoNode::new(ctx.clone()).serialize().unwrap();
        desc.components.retain(|c| c.name != AUDIO_PARAMS);

        let mut tasks = JoinSet::new();
        let result = VideoNode::deserialize(&ctx, &desc, &mut tasks, None);
        assert!(matches!(result, Err(DescriptionError::MissingComponent(ref n)) if n == AUDIO_PARAMS));
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_export_stereo_has_no_attenuation() {
        let node = VideoNode::new(test_context(resolver()));
        node.set_audio_params(AudioParams {
            audio_type: AudioType::Stereo,
            distance_model: DistanceModel::Exponential,
            rolloff_factor: 4.0,
            ..AudioParams::default()
        });

        let export = node.prepare_for_export().unwrap();
        let audio = export.get(AUDIO_PARAMS).unwrap();
        assert_eq!(audio["distanceModel"], "linear");
        assert_eq!(audio["rolloffFactor"], 0.0);
        // Persisted settings are untouched.
        assert_eq!(node.distance_model(), DistanceModel::Exponential);
    }

    #[tokio::test]
    async fn test_export_gates_billboard_and_link_on_flat() {
        let node = VideoNode::new(test_context(resolver()));
        node.set_billboard(true);
        node.set_href("https://hubs.test/room");

        let export = node.prepare_for_export().unwrap();
        assert!(export.contains(BILLBOARD));
        assert!(export.contains(LINK));
        assert_eq!(export.get(NETWORKED).unwrap()["id"], node.uuid().to_string());

        node.set_projection(Projection::Equirectangular);
        let export = node.prepare_for_export().unwrap();
        assert!(!export.contains(BILLBOARD));
        assert!(!export.contains(LINK));
        assert!(export.contains(VIDEO));
        assert!(export.contains(AUDIO_PARAMS));

        let desc = node.serialize().unwrap();
        assert!(desc.has_component(BILLBOARD));
        assert!(desc.has_component(LINK));
    }

    #[tokio::test]
    async fn test_copy_and_clone() {
        let resolver = resolver();
        let source = VideoNode::new(test_context(resolver.clone()));
        source.load(CLIP, None).await;
        source.set_controls(false);
        source.set_billboard(true);
        source.set_href("https://hubs.test/a");
        source.set_name("Lobby Screen");

        let copy = source.clone_node();
        assert_ne!(copy.uuid(), source.uuid());
        assert_eq!(copy.name(), "Lobby Screen");
        assert_eq!(copy.src(), CLIP);
        assert!(!copy.controls());
        assert!(copy.billboard());
        assert_eq!(copy.href(), "https://hubs.test/a");
        // Copying does not reload.
        assert_eq!(resolver.call_count(CLIP), 1);
    }

    #[tokio::test]
    async fn test_clone_keeps_media_and_settings() {
        let resolver = resolver();
        let source = VideoNode::new(test_context(resolver.clone()));
        source.load(CLIP, None).await;
        source.set_projection(Projection::Equirectangular);
        source.set_looping(true);
        source.set_auto_play(false);
        let mut audio = source.audio_params();
        audio.audio_type = AudioType::Stereo;
        audio.gain = 1.7;
        source.set_audio_params(audio);

        let copy = source.clone_node();
        assert_eq!(copy.projection(), Projection::Equirectangular);
        assert!(copy.looping());
        assert!(copy.element().is_looping());
        assert!(!copy.auto_play());
        assert_eq!(copy.audio_params(), source.audio_params());
        assert_eq!(copy.load_state(), LoadState::Ready);

        let copied = copy.runtime_resources_for_stats().unwrap();
        let original = source.runtime_resources_for_stats().unwrap();
        assert_eq!(copied.textures, original.textures);
        assert_ne!(copied.meshes, original.meshes);
        assert_eq!(copy.mesh().projection, Projection::Equirectangular);
        assert!(copy.mesh().visible);

        // Same source is a no-op on the copy, which already shows the media.
        copy.load(CLIP, None).await;
        assert_eq!(resolver.call_count(CLIP), 1);
        assert!(copy.runtime_resources_for_stats().is_some());
    }

    #[tokio::test]
    async fn test_runtime_resources() {
        let node = VideoNode::new(test_context(resolver()));
        assert!(node.runtime_resources_for_stats().is_none());

        node.load(CLIP, None).await;
        let resources = node.runtime_resources_for_stats().unwrap();
        assert_eq!(resources.textures.len(), 1);
        assert_eq!(resources.textures[0].width, 1280);
        assert_eq!(resources.meshes, vec![node.mesh().id]);
        assert_eq!(resources.materials.len(), 1);
    }

    #[tokio::test]
    async fn test_property_access() {
        let node = VideoNode::new(test_context(resolver()));

        node.set_property("gain", &PropertyValue::Number(2.0)).unwrap();
        node.set_property("projection", &"360-equirectangular".into()).unwrap();
        node.set_property("audioType", &AudioType::Stereo.into()).unwrap();
        node.set_property("coneOuterGain", &PropertyValue::Number(7.0)).unwrap();

        assert_eq!(node.property("gain"), Some(PropertyValue::Number(2.0)));
        assert_eq!(node.projection(), Projection::Equirectangular);
        assert_eq!(node.mesh().projection, Projection::Equirectangular);
        assert_eq!(node.audio_type(), AudioType::Stereo);
        assert_eq!(node.audio_params().cone_outer_gain, 1.0);
        assert_eq!(node.property("nope"), None);

        assert!(node.set_property("gain", &PropertyValue::Bool(true)).is_err());
        assert!(node.set_property("nope", &PropertyValue::Bool(true)).is_err());
    }
}
