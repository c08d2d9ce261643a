//! Scene file serialization with versioning and migration.
//!
//! Uses JSON with a schema version field for forward-compatible persistence.

use scenery_core::{Result, SceneryError};
use serde::{Deserialize, Serialize};

use crate::scene::SceneDescription;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned scene file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct SceneFile {
    /// Schema version for migration.
    pub version: u32,
    /// The scene data.
    pub scene: SceneDescription,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl SceneFile {
    /// Wrap a scene description.
    pub fn new(scene: SceneDescription) -> Self {
        Self {
            version: CURRENT_VERSION,
            scene,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| SceneryError::Serialization(format!("Failed to serialize scene: {}", e)))
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| SceneryError::Serialization(format!("Invalid JSON: {}", e)))?;

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;

        if version > CURRENT_VERSION {
            return Err(SceneryError::Serialization(format!(
                "Scene file version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        let migrated = migrate(raw, version)?;

        serde_json::from_value(migrated)
            .map_err(|e| SceneryError::Serialization(format!("Failed to parse scene: {}", e)))
    }

    /// Save to a file path.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: bare scene object without the wrapper
                if data.get("version").is_none() {
                    data = serde_json::json!({
                        "version": 1,
                        "scene": data,
                        "app_version": "0.1.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(SceneryError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}
