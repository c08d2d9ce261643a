//! Scenery UI - egui property panels for scene nodes
//!
//! Provides:
//! - `PropertyPanel`: declarative field bindings for a node type
//! - `set_property_selected`: change handler applying a field to the selection
//! - `VideoNodeEditor`: egui rendering of the video node panel

pub mod properties;
pub mod theme;
pub mod video_node_editor;
pub mod widgets;

pub use properties::{
    set_property_selected, FieldBinding, FieldKind, PanelSection, PropertyPanel,
};
pub use theme::Theme;
pub use video_node_editor::VideoNodeEditor;
