//! Editor configuration.
//!
//! Stored as JSON. A missing file yields the defaults so a fresh install
//! works without any setup.

use crate::error::{Result, SceneryError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Editor-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Source assigned to freshly created video nodes. Empty leaves them
    /// unloaded.
    pub default_video_src: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Textures larger than this (in either dimension) raise a perf warning.
    pub max_texture_size: u32,
    /// Buffered events per lagging subscriber on the editor channel.
    pub event_capacity: usize,
    /// Base directory for resolving relative media paths.
    pub media_root: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_video_src: String::new(),
            log_filter: "info".to_string(),
            max_texture_size: 4096,
            event_capacity: 64,
            media_root: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON bytes.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| SceneryError::Config(format!("Invalid config: {}", e)))
    }

    /// Serialize to pretty JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| SceneryError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let data = std::fs::read(path)?;
        let config = Self::from_json(&data)?;
        info!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    /// Write the config to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
