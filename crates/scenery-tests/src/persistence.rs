//! Scene files through the full node lifecycle.

use proptest::prelude::*;
use scenery_media::Projection;
use scenery_scene::testing::{test_context, ScriptedResolver};
use scenery_scene::{
    AudioParams, AudioType, DistanceModel, EditorContext, Scene, SceneFile, VideoNode,
};
use std::sync::Arc;
use tokio::task::JoinSet;

const CLIP: &str = "https://cdn.test/clip.mp4";

// ── Helpers ────────────────────────────────────────────────────

fn context() -> EditorContext {
    test_context(Arc::new(ScriptedResolver::new().with_media(CLIP, "video/mp4")))
}

async fn reload(ctx: &EditorContext, scene: &Scene) -> Scene {
    let json = SceneFile::new(scene.serialize().unwrap()).to_json().unwrap();
    let file = SceneFile::from_json(&json).unwrap();

    let mut tasks = JoinSet::new();
    let loaded = Scene::deserialize(ctx, &file.scene, &mut tasks, None).unwrap();
    while let Some(result) = tasks.join_next().await {
        result.expect("load task panicked");
    }
    loaded
}

fn audio_params() -> impl Strategy<Value = AudioParams> {
    (
        prop::sample::select(AudioType::ALL.to_vec()),
        0.0f32..2.0,
        prop::sample::select(DistanceModel::ALL.to_vec()),
        0.0f32..10.0,
        0.0f32..100.0,
        1.0f32..10000.0,
        0.0f32..=360.0,
        0.0f32..=360.0,
        0.0f32..=1.0,
    )
        .prop_map(
            |(audio_type, gain, distance_model, rolloff, ref_d, max_d, inner, outer, outer_gain)| {
                AudioParams {
                    audio_type,
                    gain,
                    distance_model,
                    rolloff_factor: rolloff,
                    ref_distance: ref_d,
                    max_distance: max_d,
                    cone_inner_angle: inner,
                    cone_outer_angle: outer,
                    cone_outer_gain: outer_gain,
                }
            },
        )
}

// ── Round trips ────────────────────────────────────────────────

#[tokio::test]
async fn scene_file_restores_nodes_and_media() {
    let ctx = context();
    let mut scene = Scene::new(ctx.clone(), "Gallery");

    let screen = VideoNode::new(ctx.clone());
    screen.load(CLIP, None).await;
    screen.set_name("Screen");
    screen.set_billboard(true);
    screen.set_href("https://hubs.test/next");
    scene.add_node(screen.clone());

    let dome = VideoNode::new(ctx.clone());
    dome.load(CLIP, None).await;
    dome.set_projection(Projection::Equirectangular);
    scene.add_node(dome.clone());

    let loaded = reload(&ctx, &scene).await;

    assert_eq!(loaded.nodes().len(), 2);
    let restored = loaded.node(screen.uuid()).unwrap();
    assert_eq!(restored.name(), "Screen");
    assert!(restored.billboard());
    assert_eq!(restored.href(), "https://hubs.test/next");
    assert!(restored.mesh().visible);

    let restored = loaded.node(dome.uuid()).unwrap();
    assert_eq!(restored.projection(), Projection::Equirectangular);
    assert_eq!(restored.mesh().projection, Projection::Equirectangular);

    // Export drops the flat-only components on the dome but not the screen.
    let export = loaded.export().unwrap();
    let by_id = |id: uuid::Uuid| export.iter().find(|n| n.id == id).unwrap();
    assert!(by_id(screen.uuid()).components.contains("billboard"));
    assert!(by_id(screen.uuid()).components.contains("link"));
    assert!(!by_id(dome.uuid()).components.contains("billboard"));
}

#[tokio::test]
async fn scene_file_on_disk() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let path = tmp.path().join("gallery.scene.json");
    let ctx = context();
    let mut scene = Scene::new(ctx.clone(), "Gallery");
    scene.add_node(VideoNode::new(ctx.clone()));

    SceneFile::new(scene.serialize().unwrap())
        .save_to_file(&path)
        .unwrap();
    let file = SceneFile::load_from_file(&path).unwrap();

    assert_eq!(file.scene, scene.serialize().unwrap());
    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["scene"]["nodes"][0]["components"][2]["name"], "video");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn settings_survive_scene_file(
        audio in audio_params(),
        controls in any::<bool>(),
        auto_play in any::<bool>(),
        looping in any::<bool>(),
        billboard in any::<bool>(),
        equirect in any::<bool>(),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        let (original, restored) = rt.block_on(async {
            let ctx = context();
            let mut scene = Scene::new(ctx.clone(), "Prop");
            let node = VideoNode::new(ctx.clone());
            node.load(CLIP, None).await;
            node.set_controls(controls);
            node.set_auto_play(auto_play);
            node.set_looping(looping);
            node.set_billboard(billboard);
            node.set_projection(if equirect { Projection::Equirectangular } else { Projection::Flat });
            node.set_audio_params(audio.clone());
            scene.add_node(node.clone());

            let loaded = reload(&ctx, &scene).await;
            let restored = loaded.node(node.uuid()).unwrap().clone();
            (node, restored)
        });

        prop_assert_eq!(restored.controls(), original.controls());
        prop_assert_eq!(restored.auto_play(), original.auto_play());
        prop_assert_eq!(restored.looping(), original.looping());
        prop_assert_eq!(restored.billboard(), original.billboard());
        prop_assert_eq!(restored.projection(), original.projection());
        prop_assert_eq!(restored.audio_params(), audio.clone());

        let export = restored.prepare_for_export().unwrap();
        let exported = export.get("audio-params").unwrap();
        if audio.audio_type == AudioType::Stereo {
            prop_assert_eq!(&exported["distanceModel"], "linear");
            prop_assert_eq!(&exported["rolloffFactor"], 0.0);
        }
    }
}
