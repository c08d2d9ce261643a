//! Spatial audio parameters shared by every audio-emitting node.

use serde::{Deserialize, Serialize};

/// How the node's audio is spatialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioType {
    /// Non-positional stereo.
    Stereo,
    /// Positional audio through a panner.
    #[serde(rename = "pannernode")]
    PannerNode,
}

impl AudioType {
    pub const ALL: [AudioType; 2] = [AudioType::Stereo, AudioType::PannerNode];

    pub fn label(self) -> &'static str {
        match self {
            Self::Stereo => "Stereo",
            Self::PannerNode => "Positional",
        }
    }
}

/// Distance attenuation curve for positional audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    Linear,
    Inverse,
    Exponential,
}

impl DistanceModel {
    pub const ALL: [DistanceModel; 3] = [
        DistanceModel::Linear,
        DistanceModel::Inverse,
        DistanceModel::Exponential,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Inverse => "Inverse",
            Self::Exponential => "Exponential",
        }
    }
}

/// Spatial audio configuration, serialized as the `audio-params` component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioParams {
    pub audio_type: AudioType,
    /// Linear volume multiplier, >= 0.
    pub gain: f32,
    pub distance_model: DistanceModel,
    pub rolloff_factor: f32,
    pub ref_distance: f32,
    pub max_distance: f32,
    /// Degrees.
    pub cone_inner_angle: f32,
    /// Degrees.
    pub cone_outer_angle: f32,
    /// Gain outside the outer cone, in [0, 1].
    pub cone_outer_gain: f32,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            audio_type: AudioType::PannerNode,
            gain: 0.5,
            distance_model: DistanceModel::Inverse,
            rolloff_factor: 1.0,
            ref_distance: 1.0,
            max_distance: 10000.0,
            cone_inner_angle: 360.0,
            cone_outer_angle: 0.0,
            cone_outer_gain: 0.0,
        }
    }
}

impl AudioParams {
    /// Parameters as written to exported scenes.
    ///
    /// Stereo audio must not be attenuated by distance, so the model is forced
    /// to linear with a zero rolloff, which keeps the attenuation at 1.
    pub fn for_export(&self) -> AudioParams {
        match self.audio_type {
            AudioType::Stereo => AudioParams {
                distance_model: DistanceModel::Linear,
                rolloff_factor: 0.0,
                ..self.clone()
            },
            AudioType::PannerNode => self.clone(),
        }
    }

    /// Clamp every field into its valid range.
    pub fn sanitized(&self) -> AudioParams {
        AudioParams {
            gain: self.gain.max(0.0),
            rolloff_factor: self.rolloff_factor.max(0.0),
            ref_distance: self.ref_distance.max(0.0),
            max_distance: self.max_distance.max(f32::EPSILON),
            cone_inner_angle: self.cone_inner_angle.clamp(0.0, 360.0),
            cone_outer_angle: self.cone_outer_angle.clamp(0.0, 360.0),
            cone_outer_gain: self.cone_outer_gain.clamp(0.0, 1.0),
            ..self.clone()
        }
    }
}
