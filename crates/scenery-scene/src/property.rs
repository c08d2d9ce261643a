//! Dynamically typed property values exchanged with the property panel.

use crate::audio_params::{AudioType, DistanceModel};
use scenery_core::{Result, SceneryError};
use scenery_media::Projection;

/// A single field value pushed from (or shown in) the property panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Number(f32),
    Text(String),
    Projection(Projection),
    AudioType(AudioType),
    DistanceModel(DistanceModel),
}

impl PropertyValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Projection(_) => "projection",
            Self::AudioType(_) => "audio type",
            Self::DistanceModel(_) => "distance model",
        }
    }

    fn mismatch<T>(&self, name: &str, expected: &str) -> Result<T> {
        Err(SceneryError::invalid_property(
            name,
            format!("expected {}, got {}", expected, self.kind_name()),
        ))
    }

    pub fn as_bool(&self, name: &str) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            _ => self.mismatch(name, "bool"),
        }
    }

    pub fn as_number(&self, name: &str) -> Result<f32> {
        match self {
            Self::Number(v) if v.is_finite() => Ok(*v),
            Self::Number(_) => Err(SceneryError::invalid_property(name, "not a finite number")),
            _ => self.mismatch(name, "number"),
        }
    }

    pub fn as_text(&self, name: &str) -> Result<String> {
        match self {
            Self::Text(v) => Ok(v.clone()),
            _ => self.mismatch(name, "text"),
        }
    }

    pub fn as_projection(&self, name: &str) -> Result<Projection> {
        match self {
            Self::Projection(v) => Ok(*v),
            Self::Text(s) => Projection::from_name(s)
                .ok_or_else(|| SceneryError::invalid_property(name, format!("unknown projection '{}'", s))),
            _ => self.mismatch(name, "projection"),
        }
    }

    pub fn as_audio_type(&self, name: &str) -> Result<AudioType> {
        match self {
            Self::AudioType(v) => Ok(*v),
            _ => self.mismatch(name, "audio type"),
        }
    }

    pub fn as_distance_model(&self, name: &str) -> Result<DistanceModel> {
        match self {
            Self::DistanceModel(v) => Ok(*v),
            _ => self.mismatch(name, "distance model"),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Projection> for PropertyValue {
    fn from(v: Projection) -> Self {
        Self::Projection(v)
    }
}

impl From<AudioType> for PropertyValue {
    fn from(v: AudioType) -> Self {
        Self::AudioType(v)
    }
}

impl From<DistanceModel> for PropertyValue {
    fn from(v: DistanceModel) -> Self {
        Self::DistanceModel(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mismatch_is_invalid_property() {
        let err = PropertyValue::Bool(true).as_number("gain").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid property 'gain': expected number, got bool"
        );
    }

    #[test]
    fn test_projection_from_text() {
        let value = PropertyValue::from("360-equirectangular");
        assert_eq!(value.as_projection("projection").unwrap(), Projection::Equirectangular);
        assert!(PropertyValue::from("cube").as_projection("projection").is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(PropertyValue::Number(f32::NAN).as_number("gain").is_err());
    }
}
