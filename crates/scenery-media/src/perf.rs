//! Performance diagnostics for loaded media.

use crate::mesh::VideoMesh;
use scenery_core::Issue;

/// Meshes above this many triangles are flagged.
pub const MAX_TRIANGLES: u32 = 100_000;

/// Non-fatal performance issues for a loaded mesh.
pub fn object_perf_issues(mesh: &VideoMesh, max_texture_size: u32) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(tex) = mesh.texture {
        if tex.width > max_texture_size || tex.height > max_texture_size {
            issues.push(Issue::warning(format!(
                "Video resolution {}x{} exceeds the recommended maximum of {}px.",
                tex.width, tex.height, max_texture_size
            )));
        }
    }

    let triangles = mesh.triangle_count();
    if triangles > MAX_TRIANGLES {
        issues.push(Issue::warning(format!(
            "Mesh has {} triangles (max {}).",
            triangles, MAX_TRIANGLES
        )));
    }

    issues
}
