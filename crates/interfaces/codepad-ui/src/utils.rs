use crate::theme::*;
use eframe::egui;
use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Outline,
    Danger,
}

pub fn section_label(ui: &mut egui::Ui, text: &str) {
    let dim = ui.visuals().weak_text_color();
    ui.label(egui::RichText::new(text).size(11.0).color(dim).strong());
}

pub fn cmd_button(
    ui: &mut egui::Ui,
    label: &str,
    kind: ButtonKind,
    enabled: bool,
) -> egui::Response {
    let (fill, stroke_col, text_col) = match kind {
        ButtonKind::Primary => (COL_ACCENT, COL_ACCENT, Color32::WHITE),
        ButtonKind::Danger => (Color32::TRANSPARENT, COL_DANGER, COL_DANGER),
        ButtonKind::Outline => (Color32::TRANSPARENT, COL_ACCENT, COL_ACCENT),
    };
    let dim = ui.visuals().weak_text_color();
    let border = ui.visuals().widgets.noninteractive.bg_stroke.color;

    let text = egui::RichText::new(label)
        .size(12.0)
        .color(if enabled { text_col } else { dim });

    let btn = egui::Button::new(text)
        .min_size(egui::vec2(80.0, 26.0))
        .fill(if enabled && kind == ButtonKind::Primary {
            fill
        } else {
            Color32::TRANSPARENT
        })
        .stroke(egui::Stroke::new(
            1.0,
            if enabled { stroke_col } else { border },
        ));

    ui.add_enabled(enabled, btn)
}

pub fn link_button(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(egui::RichText::new(label).color(COL_ACCENT)).frame(false))
}
