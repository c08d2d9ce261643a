//! Scene loading and export without a window.

use anyhow::{Context, Result};
use scenery_media::LoadError;
use scenery_scene::{EditorContext, ErrorCallback, ExportedNode, Scene, SceneFile, VideoNode};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Read a scene file and wait until every node has finished loading.
///
/// Nodes whose media fails to load are kept; the failure is logged and shows
/// up as an issue on the node.
pub async fn load_scene(ctx: &EditorContext, path: &Path) -> Result<Scene> {
    let file = SceneFile::load_from_file(path)
        .with_context(|| format!("Failed to read scene {}", path.display()))?;

    let on_error: ErrorCallback = Arc::new(|node: &VideoNode, err: &LoadError| {
        warn!(node = %node.uuid(), url = %err.url, "Media unavailable, node kept");
    });

    let mut tasks = JoinSet::new();
    let scene = Scene::deserialize(ctx, &file.scene, &mut tasks, Some(on_error))?;
    while let Some(result) = tasks.join_next().await {
        result.context("Node load task failed")?;
    }

    info!(path = %path.display(), nodes = scene.nodes().len(), "Scene loaded");
    Ok(scene)
}

/// Exported scene as pretty-printed JSON.
pub fn export_json(scene: &Scene) -> Result<String> {
    let doc = ExportedScene {
        name: &scene.name,
        nodes: scene.export()?,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[derive(Serialize)]
struct ExportedScene<'a> {
    name: &'a str,
    nodes: Vec<ExportedNode>,
}
