//! Scenery Media - everything a video node needs to get pixels on a mesh
//!
//! This crate handles:
//! - Resolving source URLs into fetchable ones (`MediaResolver`)
//! - HLS detection and segment URL rewriting (`HlsStreamAdapter`)
//! - Attaching media to a playback element (`VideoSource`, `VideoElement`)
//! - The renderable mesh and its GPU-side handles (`VideoMesh`)
//! - Performance diagnostics for loaded media

pub mod element;
pub mod error;
pub mod hls;
pub mod mesh;
pub mod perf;
pub mod resolver;
pub mod source;

pub use element::VideoElement;
pub use error::{LoadError, LoadFailure, MediaError, ResolutionError};
pub use hls::{is_hls, HlsStreamAdapter, StreamAdapter};
pub use mesh::{MaterialHandle, Projection, RuntimeResources, TextureHandle, VideoMesh};
pub use perf::object_perf_issues;
pub use resolver::{LocalResolver, MediaMeta, MediaResolver, ResolvedMedia};
pub use source::{AttachedVideo, ProbeVideoSource, VideoSource};
