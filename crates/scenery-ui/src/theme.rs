//! Dark editor theme: palette, spacing and frame builders.

use egui::{Color32, Rounding, Stroke, Vec2};

/// Central theme shared by every panel.
pub struct Theme;

impl Theme {
    // ── Typography ─────────────────────────────────────────────
    pub const FONT_XS: f32 = 11.0; // meta, badges
    pub const FONT_SM: f32 = 13.0; // body, labels
    pub const FONT_MD: f32 = 15.0; // section headers

    // ── Spacing (4px base) ─────────────────────────────────────
    pub const SPACE_XS: f32 = 4.0;
    pub const SPACE_SM: f32 = 8.0;

    pub const RADIUS: f32 = 6.0;
    pub const STROKE_SUBTLE: f32 = 0.5;
    pub const DIVIDER_WIDTH: f32 = 1.0;

    // ── Backgrounds ────────────────────────────────────────────
    pub const fn bg() -> Color32 {
        Color32::from_rgb(18, 18, 22)
    }
    pub const fn bg1() -> Color32 {
        Color32::from_rgb(28, 28, 34)
    }
    pub const fn bg2() -> Color32 {
        Color32::from_rgb(35, 35, 42)
    }
    pub const fn bg3() -> Color32 {
        Color32::from_rgb(45, 45, 55)
    }
    /// Text inputs.
    pub const fn input_bg() -> Color32 {
        Color32::from_rgb(22, 22, 28)
    }

    // ── Text (opacity-based white) ─────────────────────────────
    pub const fn t1() -> Color32 {
        Color32::from_rgba_premultiplied(235, 235, 235, 235)
    }
    pub const fn t2() -> Color32 {
        Color32::from_rgba_premultiplied(153, 153, 153, 153)
    }
    pub const fn t3() -> Color32 {
        Color32::from_rgba_premultiplied(89, 89, 89, 89)
    }

    pub const fn accent() -> Color32 {
        Color32::from_rgb(86, 130, 255)
    }
    /// Accent @ 8%.
    pub const fn accent_subtle() -> Color32 {
        Color32::from_rgba_premultiplied(7, 10, 20, 20)
    }

    pub const fn white_04() -> Color32 {
        Color32::from_rgba_premultiplied(10, 10, 10, 10)
    }
    pub const fn white_06() -> Color32 {
        Color32::from_rgba_premultiplied(15, 15, 15, 15)
    }
    pub const fn white_08() -> Color32 {
        Color32::from_rgba_premultiplied(20, 20, 20, 20)
    }
    pub const fn white_10() -> Color32 {
        Color32::from_rgba_premultiplied(26, 26, 26, 26)
    }
    pub const fn white_25() -> Color32 {
        Color32::from_rgba_premultiplied(64, 64, 64, 64)
    }

    // ── Issue severities ───────────────────────────────────────
    pub const fn red() -> Color32 {
        Color32::from_rgb(255, 88, 85)
    }
    pub const fn amber() -> Color32 {
        Color32::from_rgb(255, 184, 48)
    }
    pub const fn cyan() -> Color32 {
        Color32::from_rgb(34, 211, 238)
    }

    /// Return a color with replaced alpha.
    pub const fn with_alpha(c: Color32, a: u8) -> Color32 {
        Color32::from_rgba_premultiplied(
            (c.r() as u16 * a as u16 / 255) as u8,
            (c.g() as u16 * a as u16 / 255) as u8,
            (c.b() as u16 * a as u16 / 255) as u8,
            a,
        )
    }

    // ── Frame builders ─────────────────────────────────────────

    /// Standard side panel frame.
    pub fn panel_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Self::bg1())
            .inner_margin(egui::Margin::same(Self::SPACE_SM))
    }

    /// Text input background with subtle border.
    pub fn input_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Self::input_bg())
            .stroke(Stroke::new(Self::STROKE_SUBTLE, Self::white_10()))
            .rounding(Rounding::same(Self::RADIUS))
            .inner_margin(egui::Margin::symmetric(Self::SPACE_SM, 5.0))
    }

    /// Draw a 1px horizontal divider.
    pub fn draw_separator(ui: &mut egui::Ui) {
        let width = ui.available_width();
        let (resp, painter) =
            ui.allocate_painter(Vec2::new(width, Self::DIVIDER_WIDTH), egui::Sense::hover());
        painter.rect_filled(resp.rect, 0.0, Self::white_06());
    }

    /// Apply the theme to an egui context.
    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let visuals = &mut style.visuals;
        *visuals = egui::Visuals::dark();

        visuals.panel_fill = Self::bg1();
        visuals.window_fill = Self::bg2();
        visuals.extreme_bg_color = Self::bg();
        visuals.faint_bg_color = Self::bg2();

        visuals.widgets.noninteractive.bg_fill = Self::bg2();
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::t3());
        visuals.widgets.noninteractive.rounding = Rounding::same(Self::RADIUS);

        visuals.widgets.inactive.bg_fill = Self::bg3();
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::t2());
        visuals.widgets.inactive.bg_stroke = Stroke::new(Self::STROKE_SUBTLE, Self::white_04());
        visuals.widgets.inactive.rounding = Rounding::same(Self::RADIUS);

        visuals.widgets.active.bg_fill = Self::accent_subtle();
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Self::accent());
        visuals.widgets.active.rounding = Rounding::same(Self::RADIUS);

        visuals.selection.bg_fill = Self::accent_subtle();
        visuals.selection.stroke = Stroke::new(1.0, Self::accent());

        style.interaction.tooltip_delay = 0.4;

        ctx.set_style(style);
    }
}
