//! Dark purple theme with neon accents.

use egui::{Color32, Visuals};

pub const COLOR_BACKGROUND: Color32 = Color32::from_rgb(26, 9, 51);
pub const COLOR_PANEL: Color32 = Color32::from_rgb(38, 18, 72);
pub const COLOR_TEXT: Color32 = Color32::from_rgb(50, 251, 226);
pub const COLOR_SUCCESS: Color32 = Color32::from_rgb(60, 242, 129);
pub const COLOR_SECONDARY: Color32 = Color32::from_rgb(234, 57, 184);
pub const COLOR_LIGHT: Color32 = Color32::from_rgb(68, 214, 44);
pub const COLOR_ERROR: Color32 = Color32::from_rgb(230, 70, 70);

/// Install the dark theme and spacing on `ctx`.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(COLOR_TEXT);
    visuals.panel_fill = COLOR_BACKGROUND;
    visuals.window_fill = COLOR_PANEL;
    visuals.extreme_bg_color = COLOR_PANEL;
    visuals.selection.bg_fill = COLOR_SECONDARY;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    ctx.set_style(style);
}
