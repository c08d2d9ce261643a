//! Scenery Core - Foundation types for the scene editor
//!
//! This crate provides the types shared by every other Scenery crate:
//! - Error taxonomy (`SceneryError`)
//! - Node diagnostics (`Issue`, `Severity`)
//! - The editor change-broadcast channel (`EventBus`)
//! - Editor configuration (`EditorConfig`)

pub mod config;
pub mod error;
pub mod events;
pub mod issue;

pub use config::EditorConfig;
pub use error::{Result, SceneryError};
pub use events::{EditorEvent, EventBus};
pub use issue::{Issue, Severity};
