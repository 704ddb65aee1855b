use crate::utils::section_label;
use eframe::egui;
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

/// Labelled single-line field. Returns true when Enter was pressed in it.
pub fn text_field<'a>(
    tui: impl TuiBuilderLogic<'a>,
    label: &str,
    value: &mut String,
    hint: &str,
    secret: bool,
) -> bool {
    let mut submitted = false;
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(4.0),
        size: taffy::Size {
            width: percent(1.),
            height: auto(),
        },
        ..Default::default()
    })
    .add(|tui| {
        tui.ui(|ui| section_label(ui, label));
        let resp = tui.ui_add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .password(secret)
                .desired_width(f32::INFINITY),
        );
        submitted = resp.lost_focus()
            && resp.ctx.input(|i| i.key_pressed(egui::Key::Enter));
    });
    submitted
}
