//! Editor window: node list, viewport status and the property panel.

use eframe::egui;
use scenery_core::EditorEvent;
use scenery_scene::{LoadState, Scene, SceneFile, VideoNode};
use scenery_ui::{Theme, VideoNodeEditor};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{error, info};
use uuid::Uuid;

pub struct SceneryApp {
    scene: Scene,
    scene_path: Option<PathBuf>,
    editor: VideoNodeEditor,
    events: broadcast::Receiver<EditorEvent>,
    status: Option<String>,
}

impl SceneryApp {
    pub fn new(cc: &eframe::CreationContext<'_>, scene: Scene, scene_path: Option<PathBuf>) -> Self {
        Theme::apply(&cc.egui_ctx);
        let events = scene.context().events().subscribe();
        Self {
            scene,
            scene_path,
            editor: VideoNodeEditor::new(),
            events,
            status: None,
        }
    }

    /// Drain pending editor events. Returns `true` if anything changed.
    fn drain_events(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changed
    }

    fn save(&mut self) {
        let path = self
            .scene_path
            .get_or_insert_with(|| PathBuf::from("untitled.scene.json"))
            .clone();

        let result = self
            .scene
            .serialize()
            .map_err(anyhow::Error::from)
            .and_then(|desc| Ok(SceneFile::new(desc).save_to_file(&path)?));

        self.status = Some(match result {
            Ok(()) => {
                info!(path = %path.display(), "Scene saved");
                format!("Saved {}", path.display())
            }
            Err(e) => {
                error!(path = %path.display(), "Save failed: {:#}", e);
                format!("Save failed: {}", e)
            }
        });
    }

    fn toggle_play(&mut self) {
        if self.scene.context().is_playing() {
            self.scene.pause();
        } else {
            self.scene.play();
        }
    }

    fn show_node_list(&mut self, ui: &mut egui::Ui) {
        let extend = ui.input(|i| i.modifiers.shift);
        let mut clicked: Option<Uuid> = None;
        let mut remove: Option<Uuid> = None;

        for node in self.scene.nodes() {
            let uuid = node.uuid();
            let selected = self.scene.selection().contains(&uuid);
            ui.horizontal(|ui| {
                let label = format!("{} {}", status_glyph(node), node.name());
                if ui.selectable_label(selected, label).clicked() {
                    clicked = Some(uuid);
                }
                if selected && ui.small_button("\u{2715}").clicked() {
                    remove = Some(uuid);
                }
            });
        }

        if let Some(uuid) = clicked {
            let mut selection = if extend {
                self.scene.selection().to_vec()
            } else {
                Vec::new()
            };
            if !selection.contains(&uuid) {
                selection.push(uuid);
            }
            self.scene.select(&selection);
        }
        if let Some(uuid) = remove {
            self.scene.remove_node(uuid);
        }

        ui.add_space(Theme::SPACE_SM);
        if ui.button("+ Video").clicked() {
            let node = self.scene.create_video_node();
            self.scene.select(&[node.uuid()]);
        }
    }

    fn show_viewport(&self, ui: &mut egui::Ui) {
        let Some(node) = self.scene.selected_nodes().into_iter().next() else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No video selected").color(Theme::t3()));
            });
            return;
        };

        ui.heading(node.name());
        ui.label(format!("Source: {}", display_src(&node)));
        ui.label(format!("State: {:?}", node.load_state()));
        ui.label(format!("Projection: {}", node.projection().label()));

        let mesh = node.mesh();
        if let Some(texture) = mesh.texture {
            ui.label(format!(
                "Texture: {}x{} | scale {:.2}x{:.2}",
                texture.width, texture.height, mesh.scale.x, mesh.scale.y
            ));
        }
        if let Some(resources) = node.runtime_resources_for_stats() {
            let bytes: u64 = resources.textures.iter().map(|t| t.byte_size()).sum();
            ui.label(format!("Texture memory: {:.1} MB", bytes as f64 / (1024.0 * 1024.0)));
        }
        if node.is_streaming().is_some() {
            ui.label("Stream: HLS");
        }
    }
}

impl eframe::App for SceneryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.drain_events() {
            ctx.request_repaint();
        }
        let loading = self
            .scene
            .nodes()
            .iter()
            .any(|n| n.load_state() == LoadState::Loading);
        if loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Add Video").clicked() {
                        let node = self.scene.create_video_node();
                        self.scene.select(&[node.uuid()]);
                        ui.close_menu();
                    }
                    if ui.button("Save").clicked() {
                        self.save();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                let play_text = if self.scene.context().is_playing() {
                    "\u{23F8} Pause"
                } else {
                    "\u{25B6} Play"
                };
                if ui.button(play_text).clicked() {
                    self.toggle_play();
                }

                if let Some(status) = &self.status {
                    ui.label(egui::RichText::new(status).color(Theme::t2()));
                }
            });
        });

        egui::SidePanel::left("scene_panel")
            .resizable(true)
            .default_width(200.0)
            .frame(Theme::panel_frame())
            .show(ctx, |ui| {
                ui.heading(&self.scene.name);
                ui.separator();
                self.show_node_list(ui);
            });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(300.0)
            .frame(Theme::panel_frame())
            .show(ctx, |ui| {
                let multi_edit = self.scene.selection().len() > 1;
                self.editor.show(ui, &self.scene, multi_edit);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_viewport(ui);
        });
    }
}

fn status_glyph(node: &VideoNode) -> &'static str {
    match node.load_state() {
        LoadState::Idle => "\u{25CB}",
        LoadState::Loading => "\u{25CC}",
        LoadState::Ready => "\u{25CF}",
        LoadState::Error => "\u{26A0}",
    }
}

fn display_src(node: &VideoNode) -> String {
    let src = node.src();
    if src.is_empty() {
        "(none)".to_string()
    } else {
        src
    }
}
