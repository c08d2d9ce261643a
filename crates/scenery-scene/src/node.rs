//! Base scene-graph node shared by every editor node type.

use crate::components::{TransformComponent, VisibleComponent, TRANSFORM, VISIBLE};
use crate::description::{ComponentBlock, DescriptionError, NodeDescription};
use crate::export::ExportComponents;
use glam::{EulerRot, Mat4, Quat, Vec3};
use uuid::Uuid;

/// Local transform of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    fn to_component(self) -> TransformComponent {
        TransformComponent {
            position: self.position.to_array(),
            rotation: self.rotation.to_array(),
            scale: self.scale.to_array(),
        }
    }

    fn from_component(c: TransformComponent) -> Self {
        Self {
            position: Vec3::from_array(c.position),
            rotation: Vec3::from_array(c.rotation),
            scale: Vec3::from_array(c.scale),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// State every scene-graph node carries regardless of its type.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub uuid: Uuid,
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
        }
    }

    /// Rebuild the base from a description. Missing base components fall
    /// back to identity / visible; a missing id gets a fresh one.
    pub fn deserialize(description: &NodeDescription) -> Result<Self, DescriptionError> {
        let transform = description
            .parse_component::<TransformComponent>(TRANSFORM)?
            .map(Transform::from_component)
            .unwrap_or_default();
        let visible = description
            .parse_component::<VisibleComponent>(VISIBLE)?
            .map_or(true, |c| c.visible);

        Ok(Self {
            uuid: description.id.unwrap_or_else(Uuid::new_v4),
            name: description.name.clone(),
            transform,
            visible,
        })
    }

    /// Base components followed by the node type's own.
    pub fn serialize(&self, components: Vec<ComponentBlock>) -> Result<NodeDescription, DescriptionError> {
        let mut blocks = vec![
            ComponentBlock::new(TRANSFORM, &self.transform.to_component())?,
            ComponentBlock::new(VISIBLE, &VisibleComponent { visible: self.visible })?,
        ];
        blocks.extend(components);

        Ok(NodeDescription {
            id: Some(self.uuid),
            name: self.name.clone(),
            components: blocks,
        })
    }

    /// Base export components. Only hidden nodes need one.
    pub fn prepare_for_export(&self, export: &mut ExportComponents) -> Result<(), DescriptionError> {
        if !self.visible {
            export.add(VISIBLE, &VisibleComponent { visible: false })?;
        }
        Ok(())
    }

    /// Copy everything but the identity.
    pub fn copy_from(&mut self, source: &SceneNode) {
        self.name = source.name.clone();
        self.transform = source.transform;
        self.visible = source.visible;
    }
}

/// Behavior every node type exposes to the scene.
pub trait EditorNode {
    /// Display name of the node type.
    fn node_name(&self) -> &'static str;

    fn uuid(&self) -> Uuid;

    /// Persisted description.
    fn serialize(&self) -> Result<NodeDescription, DescriptionError>;

    /// Components written into an exported scene.
    fn prepare_for_export(&self) -> Result<ExportComponents, DescriptionError>;
}
