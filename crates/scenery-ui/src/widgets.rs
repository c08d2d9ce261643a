//! Shared inputs: toggle switch, slider, labeled row, collapsible section.

use crate::theme::Theme;
use egui::{self, Color32, Pos2, Rounding, Stroke, Vec2};

const LABEL_WIDTH: f32 = 110.0;

/// Toggle switch. Returns `true` if clicked.
pub fn toggle_switch(ui: &mut egui::Ui, on: bool) -> bool {
    let desired_size = Vec2::new(30.0, 16.0);
    let (resp, painter) = ui.allocate_painter(desired_size, egui::Sense::click());
    let rect = resp.rect;

    let pill_rounding = Rounding::same(rect.height() / 2.0);
    let (track_bg, track_border) = if on {
        (
            Theme::with_alpha(Theme::accent(), 90),
            Theme::with_alpha(Theme::accent(), 130),
        )
    } else {
        (Theme::white_04(), Theme::white_08())
    };
    painter.rect_filled(rect, pill_rounding, track_bg);
    painter.rect_stroke(rect, pill_rounding, Stroke::new(0.5, track_border));

    let thumb_radius = 6.0;
    let anim_t = ui
        .ctx()
        .animate_bool_with_time(resp.id.with("toggle_anim"), on, 0.15);
    let thumb_x = egui::lerp(
        rect.left() + thumb_radius + 2.0..=rect.right() - thumb_radius - 2.0,
        anim_t,
    );
    let thumb_color = if on { Theme::accent() } else { Theme::white_25() };
    painter.circle_filled(Pos2::new(thumb_x, rect.center().y), thumb_radius, thumb_color);

    resp.clicked()
}

/// Horizontal slider. Returns `true` when the value changed this frame.
pub fn themed_slider(
    ui: &mut egui::Ui,
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
    accent: Color32,
) -> bool {
    let before = *value;

    let track_width = (ui.available_width() - 52.0).max(40.0);
    let track_height = 4.0;
    let (track_resp, track_painter) =
        ui.allocate_painter(Vec2::new(track_width, 22.0), egui::Sense::click_and_drag());
    let bar_rect =
        egui::Rect::from_center_size(track_resp.rect.center(), Vec2::new(track_width, track_height));

    track_painter.rect_filled(bar_rect, Rounding::same(2.0), Theme::white_06());

    let min = *range.start();
    let max = *range.end();
    let frac = if max > min { (*value - min) / (max - min) } else { 0.0 };
    let fill_width = bar_rect.width() * frac.clamp(0.0, 1.0);
    let fill_rect = egui::Rect::from_min_size(bar_rect.min, Vec2::new(fill_width, track_height));
    track_painter.rect_filled(fill_rect, Rounding::same(2.0), accent);

    let thumb_center = Pos2::new(bar_rect.left() + fill_width, bar_rect.center().y);
    track_painter.circle_filled(thumb_center, 5.0, Color32::WHITE);
    track_painter.circle_stroke(
        thumb_center,
        5.0,
        Stroke::new(1.0, Color32::from_rgba_premultiplied(0, 0, 0, 60)),
    );

    if track_resp.dragged() || track_resp.clicked() {
        if let Some(pos) = track_resp.interact_pointer_pos() {
            let rel = ((pos.x - bar_rect.left()) / bar_rect.width()).clamp(0.0, 1.0);
            *value = min + rel * (max - min);
        }
    }

    ui.label(
        egui::RichText::new(format!("{:.2}", *value))
            .size(Theme::FONT_XS)
            .color(Theme::t2())
            .family(egui::FontFamily::Monospace),
    );

    *value != before
}

/// A label column followed by the input, like an input group.
pub fn input_row<R>(
    ui: &mut egui::Ui,
    label: &str,
    add_input: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);
        ui.allocate_ui(Vec2::new(LABEL_WIDTH, 22.0), |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(label)
                        .size(Theme::FONT_XS)
                        .color(Theme::t3()),
                );
            });
        });
        add_input(ui)
    })
    .inner
}

/// Section header toggling `open`, with its content indented below.
pub fn collapsible_section(
    ui: &mut egui::Ui,
    title: &str,
    open: &mut bool,
    content: impl FnOnce(&mut egui::Ui),
) {
    let chevron = if *open { "\u{25BE}" } else { "\u{25B8}" };

    ui.add_space(Theme::SPACE_XS);
    Theme::draw_separator(ui);

    let header = ui
        .horizontal(|ui| {
            ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);
            ui.label(egui::RichText::new(chevron).size(8.0).color(Theme::t3()));
            ui.label(
                egui::RichText::new(title)
                    .size(Theme::FONT_SM)
                    .color(Theme::t2())
                    .strong(),
            );
        })
        .response
        .interact(egui::Sense::click());

    if header.clicked() {
        *open = !*open;
    }

    if *open {
        ui.indent(title, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(0.0, 4.0);
            content(ui);
        });
    }
}
