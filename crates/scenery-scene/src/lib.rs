//! Scenery Scene - scene graph nodes and scene files
//!
//! Implements the editable scene:
//! - `VideoNode`: video element + spatial audio with an async load lifecycle
//! - Persisted node descriptions and export components
//! - `Scene`: node registry, selection and play mode
//! - Versioned scene files

pub mod audio_params;
pub mod components;
pub mod context;
pub mod description;
pub mod export;
pub mod node;
pub mod property;
pub mod scene;
pub mod serialization;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod video_node;

pub use audio_params::{AudioParams, AudioType, DistanceModel};
pub use components::{VideoComponent, VideoNodeComponents};
pub use context::EditorContext;
pub use description::{ComponentBlock, DescriptionError, NodeDescription};
pub use export::ExportComponents;
pub use node::{EditorNode, SceneNode, Transform};
pub use property::PropertyValue;
pub use scene::{ExportedNode, Scene, SceneDescription};
pub use serialization::SceneFile;
pub use video_node::{ErrorCallback, LoadOutcome, LoadState, VideoNode, LOAD_ERROR_MESSAGE};
