use eframe::egui::{self, Color32, FontFamily, FontId, Stroke, TextStyle, Visuals};

pub const COL_ACCENT: Color32 = Color32::from_rgb(99, 102, 241); // Indigo
pub const COL_DANGER: Color32 = Color32::from_rgb(225, 29, 72);
pub const COL_SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const COL_INFO: Color32 = Color32::from_rgb(125, 211, 252);

/// Surface colors that differ between light and dark mode.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color32,
    pub bg_raised: Color32,
    pub border: Color32,
    pub text: Color32,
    pub text_dim: Color32,
}

pub const DARK: Palette = Palette {
    bg: Color32::from_rgb(17, 24, 39),
    bg_raised: Color32::from_rgb(26, 26, 46),
    border: Color32::from_rgb(45, 45, 70),
    text: Color32::from_rgb(229, 231, 235),
    text_dim: Color32::from_rgb(156, 163, 175),
};

pub const LIGHT: Palette = Palette {
    bg: Color32::from_rgb(243, 244, 246),
    bg_raised: Color32::WHITE,
    border: Color32::from_rgb(209, 213, 219),
    text: Color32::from_rgb(31, 41, 55),
    text_dim: Color32::from_rgb(107, 114, 128),
};

pub fn palette(light_mode: bool) -> Palette {
    if light_mode {
        LIGHT
    } else {
        DARK
    }
}

pub fn setup(ctx: &egui::Context, light_mode: bool) {
    let pal = palette(light_mode);
    let mut visuals = if light_mode {
        Visuals::light()
    } else {
        Visuals::dark()
    };
    visuals.window_fill = pal.bg;
    visuals.panel_fill = pal.bg;
    visuals.extreme_bg_color = pal.bg_raised;
    visuals.override_text_color = Some(pal.text);

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, pal.border);
    visuals.widgets.inactive.bg_fill = pal.bg_raised;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, pal.text_dim);

    visuals.widgets.hovered.bg_fill = COL_ACCENT.linear_multiply(0.15);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, COL_ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, COL_ACCENT);

    visuals.widgets.active.bg_fill = COL_ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, pal.bg);

    visuals.selection.bg_fill = COL_ACCENT.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, COL_ACCENT);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(10.0, FontFamily::Proportional)),
    ]
    .into();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.visuals.button_frame = true;

    ctx.set_style(style);
}
