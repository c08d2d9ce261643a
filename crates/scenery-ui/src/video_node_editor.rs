//! Property editor for video nodes.

use crate::properties::{set_property_selected, FieldBinding, FieldKind, PropertyPanel};
use crate::theme::Theme;
use crate::widgets::{collapsible_section, input_row, themed_slider, toggle_switch};
use egui::{self, Color32, Vec2};
use scenery_core::{Issue, Severity};
use scenery_media::Projection;
use scenery_scene::{AudioType, DistanceModel, PropertyValue, Scene, VideoNode};
use std::collections::{HashMap, HashSet};
use tracing::warn;
use uuid::Uuid;

/// Renders [`PropertyPanel::for_video_node`] for the current selection.
///
/// Values shown are those of the first selected node; edits go to the whole
/// selection through [`set_property_selected`].
pub struct VideoNodeEditor {
    panel: PropertyPanel,
    collapsed: HashSet<&'static str>,
    /// Text being typed into URL/text fields, committed on focus loss.
    drafts: HashMap<&'static str, String>,
    drafts_for: Option<Uuid>,
}

impl VideoNodeEditor {
    pub fn new() -> Self {
        Self {
            panel: PropertyPanel::for_video_node(),
            collapsed: HashSet::new(),
            drafts: HashMap::new(),
            drafts_for: None,
        }
    }

    pub fn panel(&self) -> &PropertyPanel {
        &self.panel
    }

    /// Draw the panel. Returns the fields edited this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, scene: &Scene, multi_edit: bool) -> Vec<&'static str> {
        let selected = scene.selected_nodes();
        let Some(node) = selected.first() else {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.label(
                    egui::RichText::new("Select a video to edit")
                        .size(Theme::FONT_XS)
                        .color(Theme::t3()),
                );
            });
            return Vec::new();
        };

        if self.drafts_for != Some(node.uuid()) {
            self.drafts.clear();
            self.drafts_for = Some(node.uuid());
        }

        ui.spacing_mut().item_spacing = Vec2::new(0.0, 4.0);
        show_header(ui, node, self.panel.description, multi_edit.then_some(selected.len()));

        let mut changes = Vec::new();
        let Self {
            panel,
            collapsed,
            drafts,
            ..
        } = self;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for section in &panel.sections {
                    match section.title {
                        None => show_fields(ui, node, &section.fields, drafts, &mut changes),
                        Some(title) => {
                            let mut open = !collapsed.contains(title);
                            collapsible_section(ui, title, &mut open, |ui| {
                                show_fields(ui, node, &section.fields, drafts, &mut changes);
                            });
                            if open {
                                collapsed.remove(title);
                            } else {
                                collapsed.insert(title);
                            }
                        }
                    }
                }

                show_issues(ui, &node.issues());
            });

        let mut edited = Vec::with_capacity(changes.len());
        for (field, value) in changes {
            if let Err(e) = set_property_selected(scene, field)(value) {
                warn!(field, "Edit not applied: {}", e);
            }
            edited.push(field);
        }
        edited
    }
}

impl Default for VideoNodeEditor {
    fn default() -> Self {
        Self::new()
    }
}

// ── Sections ───────────────────────────────────────────────────

fn show_header(ui: &mut egui::Ui, node: &VideoNode, description: &str, editing: Option<usize>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(8.0, 0.0);
        ui.label(
            egui::RichText::new(node.name())
                .size(Theme::FONT_MD)
                .color(Theme::t1())
                .strong(),
        );
        if node.is_loading_placeholder_visible() {
            ui.spinner();
        }
        if node.is_error_icon_visible() {
            ui.label(egui::RichText::new("\u{26A0}").color(Theme::red()));
        }
    });
    ui.label(
        egui::RichText::new(description)
            .size(Theme::FONT_XS)
            .color(Theme::t2()),
    );
    if let Some(attribution) = node.attribution() {
        ui.label(
            egui::RichText::new(attribution)
                .size(Theme::FONT_XS)
                .color(Theme::t3())
                .italics(),
        );
    }
    if let Some(count) = editing.filter(|n| *n > 1) {
        ui.label(
            egui::RichText::new(format!("Editing {} nodes", count))
                .size(Theme::FONT_XS)
                .color(Theme::accent()),
        );
    }
    ui.add_space(Theme::SPACE_XS);
}

fn show_fields(
    ui: &mut egui::Ui,
    node: &VideoNode,
    fields: &[FieldBinding],
    drafts: &mut HashMap<&'static str, String>,
    changes: &mut Vec<(&'static str, PropertyValue)>,
) {
    for field in fields {
        let Some(current) = node.property(field.name) else {
            continue;
        };
        let edited = input_row(ui, field.label, |ui| {
            field_input(ui, field, &current, drafts)
        });
        if let Some(value) = edited {
            changes.push((field.name, value));
        }
    }
}

fn field_input(
    ui: &mut egui::Ui,
    field: &FieldBinding,
    current: &PropertyValue,
    drafts: &mut HashMap<&'static str, String>,
) -> Option<PropertyValue> {
    match (field.kind, current) {
        (FieldKind::Url | FieldKind::Text, PropertyValue::Text(text)) => {
            let id = ui.make_persistent_id(field.name);
            let draft = drafts.entry(field.name).or_default();
            if !ui.memory(|m| m.has_focus(id)) {
                draft.clone_from(text);
            }
            let hint = if field.kind == FieldKind::Url {
                "https://"
            } else {
                ""
            };
            let resp = Theme::input_frame()
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(draft)
                            .id(id)
                            .hint_text(hint)
                            .frame(false)
                            .desired_width(f32::INFINITY),
                    )
                })
                .inner;
            (resp.lost_focus() && draft != text).then(|| PropertyValue::Text(draft.clone()))
        }
        (FieldKind::Toggle, PropertyValue::Bool(on)) => {
            toggle_switch(ui, *on).then_some(PropertyValue::Bool(!on))
        }
        (FieldKind::Number { min, max }, PropertyValue::Number(n)) => {
            let mut value = *n;
            themed_slider(ui, &mut value, min..=max, Theme::accent())
                .then_some(PropertyValue::Number(value))
        }
        (FieldKind::Projection, PropertyValue::Projection(p)) => {
            choice(ui, field.name, *p, &Projection::ALL, |p| p.label()).map(Into::into)
        }
        (FieldKind::AudioType, PropertyValue::AudioType(t)) => {
            choice(ui, field.name, *t, &AudioType::ALL, |t| t.label()).map(Into::into)
        }
        (FieldKind::DistanceModel, PropertyValue::DistanceModel(m)) => {
            choice(ui, field.name, *m, &DistanceModel::ALL, |m| m.label()).map(Into::into)
        }
        (kind, value) => {
            ui.label(
                egui::RichText::new(format!("{:?} for {:?}", value, kind))
                    .size(Theme::FONT_XS)
                    .color(Theme::red()),
            );
            None
        }
    }
}

/// Combo box over `options`. Returns the newly picked option.
fn choice<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    id_salt: &str,
    current: T,
    options: &[T],
    label: impl Fn(T) -> &'static str,
) -> Option<T> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(label(current))
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(&mut selected, *option, label(*option));
            }
        });
    (selected != current).then_some(selected)
}

fn show_issues(ui: &mut egui::Ui, issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }
    ui.add_space(Theme::SPACE_SM);
    Theme::draw_separator(ui);
    for issue in issues {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);
            let color = severity_color(issue.severity);
            ui.label(egui::RichText::new("\u{25CF}").size(8.0).color(color));
            ui.label(
                egui::RichText::new(&issue.message)
                    .size(Theme::FONT_XS)
                    .color(color),
            );
        });
    }
}

fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Error => Theme::red(),
        Severity::Warning => Theme::amber(),
        Severity::Info => Theme::cyan(),
    }
}
