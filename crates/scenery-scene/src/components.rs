//! Typed component payloads written by video nodes.

use crate::audio_params::AudioParams;
use crate::description::{ComponentBlock, DescriptionError, NodeDescription};
use scenery_media::Projection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const VIDEO: &str = "video";
pub const AUDIO_PARAMS: &str = "audio-params";
pub const BILLBOARD: &str = "billboard";
pub const LINK: &str = "link";
pub const NETWORKED: &str = "networked";
pub const TRANSFORM: &str = "transform";
pub const VISIBLE: &str = "visible";

/// `video` component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoComponent {
    pub src: String,
    pub controls: bool,
    pub auto_play: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub projection: Projection,
}

/// `billboard` component. Presence alone enables the behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillboardComponent {}

/// `link` component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkComponent {
    pub href: String,
}

/// `networked` component, only written on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkedComponent {
    pub id: Uuid,
}

/// `transform` component of the base node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformComponent {
    pub position: [f32; 3],
    /// Euler angles in radians, XYZ order.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

/// `visible` component of the base node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleComponent {
    pub visible: bool,
}

/// Everything a video node contributes to its persisted description.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoNodeComponents {
    pub video: VideoComponent,
    pub audio_params: AudioParams,
    pub billboard: Option<BillboardComponent>,
    pub link: Option<LinkComponent>,
}

impl VideoNodeComponents {
    /// Read from a description. `video` and `audio-params` are required.
    pub fn from_description(description: &NodeDescription) -> Result<Self, DescriptionError> {
        Ok(Self {
            video: description.require_component(VIDEO)?,
            audio_params: description.require_component(AUDIO_PARAMS)?,
            billboard: description
                .has_component(BILLBOARD)
                .then_some(BillboardComponent {}),
            link: description.parse_component(LINK)?,
        })
    }

    /// Encode as component blocks, skipping absent optional blocks.
    pub fn to_blocks(&self) -> Result<Vec<ComponentBlock>, DescriptionError> {
        let mut blocks = vec![
            ComponentBlock::new(VIDEO, &self.video)?,
            ComponentBlock::new(AUDIO_PARAMS, &self.audio_params)?,
        ];
        if let Some(billboard) = &self.billboard {
            blocks.push(ComponentBlock::new(BILLBOARD, billboard)?);
        }
        if let Some(link) = &self.link {
            blocks.push(ComponentBlock::new(LINK, link)?);
        }
        Ok(blocks)
    }
}
