//! Property panel edits flowing into scene nodes.

use scenery_core::EditorEvent;
use scenery_scene::testing::{test_context, ScriptedResolver};
use scenery_scene::{AudioType, LoadState, PropertyValue, Scene, VideoNode};
use scenery_ui::{set_property_selected, PropertyPanel};
use std::sync::Arc;
use std::time::Duration;

const CLIP: &str = "https://cdn.test/clip.mp4";

fn scene_with(count: usize, resolver: Arc<ScriptedResolver>) -> (Scene, Vec<VideoNode>) {
    let mut scene = Scene::new(test_context(resolver), "Panel");
    let nodes: Vec<VideoNode> = (0..count)
        .map(|_| VideoNode::new(scene.context().clone()))
        .collect();
    for node in &nodes {
        scene.add_node(node.clone());
    }
    (scene, nodes)
}

async fn wait_until_loaded(nodes: &[VideoNode]) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while nodes
            .iter()
            .any(|n| matches!(n.load_state(), LoadState::Idle | LoadState::Loading))
        {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("loads did not finish");
}

#[tokio::test]
async fn src_edit_loads_every_selected_node() {
    let resolver = Arc::new(ScriptedResolver::new().with_media(CLIP, "video/mp4"));
    let (mut scene, nodes) = scene_with(2, resolver.clone());
    scene.select(&[nodes[0].uuid(), nodes[1].uuid()]);

    set_property_selected(&scene, "src")(CLIP.into()).unwrap();
    wait_until_loaded(&nodes).await;

    for node in &nodes {
        assert_eq!(node.src(), CLIP);
        assert_eq!(node.load_state(), LoadState::Ready);
    }
    assert_eq!(resolver.call_count(CLIP), 2);
}

#[tokio::test]
async fn every_panel_field_round_trips_through_the_handler() {
    let (mut scene, nodes) = scene_with(1, Arc::new(ScriptedResolver::new()));
    scene.select(&[nodes[0].uuid()]);
    let panel = PropertyPanel::for_video_node();

    for field in panel.fields().filter(|f| f.name != "src") {
        let current = nodes[0].property(field.name).unwrap();
        set_property_selected(&scene, field.name)(current.clone()).unwrap();
        assert_eq!(nodes[0].property(field.name), Some(current), "{}", field.name);
    }
}

#[tokio::test]
async fn audio_edit_reaches_export_and_notifies() {
    let (mut scene, nodes) = scene_with(1, Arc::new(ScriptedResolver::new()));
    scene.select(&[nodes[0].uuid()]);
    let mut rx = scene.context().events().subscribe();

    set_property_selected(&scene, "audioType")(AudioType::Stereo.into()).unwrap();
    set_property_selected(&scene, "rolloffFactor")(PropertyValue::Number(3.0)).unwrap();

    let export = nodes[0].prepare_for_export().unwrap();
    let audio = export.get("audio-params").unwrap();
    assert_eq!(audio["audioType"], "stereo");
    assert_eq!(audio["rolloffFactor"], 0.0);
    assert_eq!(nodes[0].audio_params().rolloff_factor, 3.0);

    assert_eq!(
        rx.try_recv().unwrap(),
        EditorEvent::ObjectsChanged(vec![nodes[0].uuid()])
    );
}
