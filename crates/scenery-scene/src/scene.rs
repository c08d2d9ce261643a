//! Scene: the set of nodes being edited and the current selection.

use crate::context::EditorContext;
use crate::description::{DescriptionError, NodeDescription};
use crate::export::ExportComponents;
use crate::node::EditorNode;
use crate::video_node::{ErrorCallback, VideoNode};
use scenery_core::EditorEvent;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::info;
use uuid::Uuid;

/// Persisted form of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
}

/// Exported form of a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedNode {
    pub id: Uuid,
    pub name: String,
    pub components: ExportComponents,
}

/// A scene being edited.
pub struct Scene {
    ctx: EditorContext,
    /// Scene name
    pub name: String,
    nodes: Vec<VideoNode>,
    selection: Vec<Uuid>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(ctx: EditorContext, name: impl Into<String>) -> Self {
        Self {
            ctx,
            name: name.into(),
            nodes: Vec::new(),
            selection: Vec::new(),
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn nodes(&self) -> &[VideoNode] {
        &self.nodes
    }

    pub fn node(&self, uuid: Uuid) -> Option<&VideoNode> {
        self.nodes.iter().find(|n| n.uuid() == uuid)
    }

    pub fn add_node(&mut self, node: VideoNode) {
        self.ctx.publish(EditorEvent::ObjectsChanged(vec![node.uuid()]));
        self.nodes.push(node);
    }

    /// Add a new video node and start loading the configured default source,
    /// if there is one.
    pub fn create_video_node(&mut self) -> VideoNode {
        let node = VideoNode::new(self.ctx.clone());
        let src = &self.ctx.config().default_video_src;
        if !src.is_empty() {
            node.set_src(src.clone());
        }
        self.add_node(node.clone());
        node
    }

    /// Remove a node, dropping it from the selection too.
    pub fn remove_node(&mut self, uuid: Uuid) -> Option<VideoNode> {
        let index = self.nodes.iter().position(|n| n.uuid() == uuid)?;
        let node = self.nodes.remove(index);
        if self.selection.contains(&uuid) {
            self.selection.retain(|id| *id != uuid);
            self.ctx.publish(EditorEvent::SelectionChanged);
        }
        self.ctx.publish(EditorEvent::ObjectsChanged(vec![uuid]));
        Some(node)
    }

    /// Replace the selection. Unknown ids are ignored.
    pub fn select(&mut self, ids: &[Uuid]) {
        self.selection = ids
            .iter()
            .copied()
            .filter(|id| self.node(*id).is_some())
            .collect();
        self.ctx.publish(EditorEvent::SelectionChanged);
    }

    pub fn selection(&self) -> &[Uuid] {
        &self.selection
    }

    /// Selected nodes, in selection order.
    pub fn selected_nodes(&self) -> Vec<VideoNode> {
        self.selection
            .iter()
            .filter_map(|id| self.node(*id).cloned())
            .collect()
    }

    /// Enter play mode.
    pub fn play(&self) {
        self.ctx.set_playing(true);
        for node in &self.nodes {
            node.on_play();
        }
    }

    /// Leave play mode.
    pub fn pause(&self) {
        self.ctx.set_playing(false);
        for node in &self.nodes {
            node.on_pause();
        }
    }

    /// Persisted description of every node.
    pub fn serialize(&self) -> Result<SceneDescription, DescriptionError> {
        Ok(SceneDescription {
            name: self.name.clone(),
            nodes: self
                .nodes
                .iter()
                .map(EditorNode::serialize)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Export components of every node.
    pub fn export(&self) -> Result<Vec<ExportedNode>, DescriptionError> {
        self.nodes
            .iter()
            .map(|node| {
                Ok(ExportedNode {
                    id: EditorNode::uuid(node),
                    name: node.name(),
                    components: EditorNode::prepare_for_export(node)?,
                })
            })
            .collect()
    }

    /// Rebuild a scene. Node loads are registered on `load_tasks`.
    pub fn deserialize(
        ctx: &EditorContext,
        description: &SceneDescription,
        load_tasks: &mut JoinSet<()>,
        on_error: Option<ErrorCallback>,
    ) -> Result<Self, DescriptionError> {
        let mut scene = Scene::new(ctx.clone(), description.name.clone());
        for node in &description.nodes {
            let node = VideoNode::deserialize(ctx, node, load_tasks, on_error.clone())?;
            scene.nodes.push(node);
        }
        info!(scene = %scene.name, nodes = scene.nodes.len(), "Scene deserialized");
        Ok(scene)
    }
}
