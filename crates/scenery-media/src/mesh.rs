//! Renderable mesh for a video node and the engine handles it retains.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How video content maps onto the mesh surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Flat quad.
    #[default]
    #[serde(rename = "flat")]
    Flat,
    /// Inside of a sphere, for 360° video.
    #[serde(rename = "360-equirectangular")]
    Equirectangular,
}

impl Projection {
    pub const ALL: [Projection; 2] = [Projection::Flat, Projection::Equirectangular];

    /// Wire name used in scene files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Equirectangular => "360-equirectangular",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Display label for the property panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::Flat => "2D",
            Self::Equirectangular => "360° Equirectangular",
        }
    }

    /// Triangle count of the geometry used for this projection.
    pub fn triangle_count(self) -> u32 {
        match self {
            Self::Flat => 2,
            // 64 x 32 segment UV sphere.
            Self::Equirectangular => 64 * 32 * 2 - 64 * 2,
        }
    }
}

/// A GPU texture holding decoded video frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub id: Uuid,
    pub width: u32,
    pub height: u32,
}

impl TextureHandle {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            width,
            height,
        }
    }

    /// Approximate GPU memory in bytes (RGBA8).
    pub fn byte_size(&self) -> u64 {
        self.width as u64 * self.height as u64 * 4
    }
}

/// Material the video texture is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle {
    pub id: Uuid,
}

/// Engine resources a node keeps alive, for memory accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeResources {
    pub textures: Vec<TextureHandle>,
    pub meshes: Vec<Uuid>,
    pub materials: Vec<MaterialHandle>,
}

/// The mesh a video node renders into. Owned exclusively by its node.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMesh {
    pub id: Uuid,
    pub visible: bool,
    pub projection: Projection,
    pub scale: Vec3,
    pub texture: Option<TextureHandle>,
    pub material: MaterialHandle,
}

impl VideoMesh {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            visible: true,
            projection: Projection::Flat,
            scale: Vec3::ONE,
            texture: None,
            material: MaterialHandle { id: Uuid::new_v4() },
        }
    }

    /// Swap in a new texture, returning the one it replaces.
    pub fn replace_texture(&mut self, texture: TextureHandle) -> Option<TextureHandle> {
        let previous = self.texture.replace(texture);
        self.fit_to_texture();
        previous
    }

    /// Scale a flat quad to the texture's aspect ratio; spheres stay uniform.
    pub fn fit_to_texture(&mut self) {
        self.scale = match (self.projection, self.texture) {
            (Projection::Flat, Some(tex)) if tex.width > 0 => {
                Vec3::new(1.0, tex.height as f32 / tex.width as f32, 1.0)
            }
            _ => Vec3::ONE,
        };
    }

    pub fn triangle_count(&self) -> u32 {
        self.projection.triangle_count()
    }

    /// Resources retained by this mesh, if a texture is loaded.
    pub fn runtime_resources(&self) -> Option<RuntimeResources> {
        let texture = self.texture?;
        Some(RuntimeResources {
            textures: vec![texture],
            meshes: vec![self.id],
            materials: vec![self.material],
        })
    }
}

impl Default for VideoMesh {
    fn default() -> Self {
        Self::new()
    }
}
