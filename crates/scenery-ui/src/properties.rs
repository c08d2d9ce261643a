//! Declarative property bindings and the selection change handler.
//!
//! A panel is data: each field names the node property it edits, the label
//! shown next to it and the kind of input that edits it. Rendering lives in
//! the node editors.

use scenery_core::{EditorEvent, Result};
use scenery_scene::{PropertyValue, Scene};
use tracing::{debug, warn};

// ── Bindings ───────────────────────────────────────────────────

/// Input used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Media URL text input.
    Url,
    Toggle,
    /// Numeric slider over an inclusive range.
    Number { min: f32, max: f32 },
    Text,
    Projection,
    AudioType,
    DistanceModel,
}

/// One input bound to a node property by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    /// Property name passed to `VideoNode::set_property`.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldBinding {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// A titled group of fields. Untitled sections render without a header.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSection {
    pub title: Option<&'static str>,
    pub fields: Vec<FieldBinding>,
}

/// Field layout of a node type's property panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPanel {
    /// One-line summary shown above the fields.
    pub description: &'static str,
    pub sections: Vec<PanelSection>,
}

impl PropertyPanel {
    /// Panel for video nodes: the source URL, then the audio source
    /// properties, then playback.
    pub fn for_video_node() -> Self {
        use FieldKind::*;

        Self {
            description: "Dynamically loads video.",
            sections: vec![
                PanelSection {
                    title: None,
                    fields: vec![FieldBinding::new("src", "Video Url", Url)],
                },
                PanelSection {
                    title: Some("Audio"),
                    fields: vec![
                        FieldBinding::new("audioType", "Audio Type", AudioType),
                        FieldBinding::new("gain", "Volume", Number { min: 0.0, max: 2.0 }),
                        FieldBinding::new("distanceModel", "Distance Model", DistanceModel),
                        FieldBinding::new("rolloffFactor", "Rolloff", Number { min: 0.0, max: 20.0 }),
                        FieldBinding::new("refDistance", "Ref Distance", Number { min: 0.0, max: 100.0 }),
                        FieldBinding::new("maxDistance", "Max Distance", Number { min: 0.0, max: 10000.0 }),
                        FieldBinding::new("coneInnerAngle", "Cone Inner Angle", Number { min: 0.0, max: 360.0 }),
                        FieldBinding::new("coneOuterAngle", "Cone Outer Angle", Number { min: 0.0, max: 360.0 }),
                        FieldBinding::new("coneOuterGain", "Cone Outer Gain", Number { min: 0.0, max: 1.0 }),
                    ],
                },
                PanelSection {
                    title: Some("Playback"),
                    fields: vec![
                        FieldBinding::new("controls", "Controls", Toggle),
                        FieldBinding::new("autoPlay", "Auto Play", Toggle),
                        FieldBinding::new("loop", "Loop", Toggle),
                        FieldBinding::new("projection", "Projection", Projection),
                        FieldBinding::new("billboard", "Billboard", Toggle),
                        FieldBinding::new("href", "Link Href", Text),
                    ],
                },
            ],
        }
    }

    /// Every field, in display order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldBinding> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields().find(|f| f.name == name)
    }
}

// ── Change handler ─────────────────────────────────────────────

/// Change handler that writes `field` on every selected node.
///
/// After the writes an `ObjectsChanged` event for the selection asks views
/// to re-render. Every selected node is attempted; the first failure is
/// returned.
pub fn set_property_selected<'a>(
    scene: &'a Scene,
    field: &'a str,
) -> impl FnMut(PropertyValue) -> Result<()> + 'a {
    move |value: PropertyValue| {
        let nodes = scene.selected_nodes();
        let mut first_err = None;

        for node in &nodes {
            if let Err(e) = node.set_property(field, &value) {
                warn!(node = %node.uuid(), field, "Property rejected: {}", e);
                first_err.get_or_insert(e);
            }
        }

        debug!(field, nodes = nodes.len(), "Property applied to selection");
        scene
            .context()
            .publish(EditorEvent::ObjectsChanged(scene.selection().to_vec()));

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
