use crate::theme::*;
use crate::utils::{cmd_button, ButtonKind};
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

#[derive(Default)]
pub struct HeaderResponse {
    pub home_clicked: bool,
    pub theme_clicked: bool,
    pub logout_clicked: bool,
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    pal: &Palette,
    light_mode: bool,
    signed_in: bool,
    busy: bool,
) -> HeaderResponse {
    let mut resp = HeaderResponse::default();

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Row,
        justify_content: Some(taffy::JustifyContent::SpaceBetween),
        align_items: Some(taffy::AlignItems::Center),
        padding: length(8.0),
        size: taffy::Size {
            width: percent(1.),
            height: percent(1.),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(pal.bg_raised)
            .with_border_color(pal.border)
            .with_border_width(1.0),
        |tui| {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(8.0),
                ..Default::default()
            })
            .add(|tui| {
                let title = tui.ui(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("</> Codepad")
                                .size(18.0)
                                .strong()
                                .color(pal.text),
                        )
                        .sense(egui::Sense::click()),
                    )
                });
                resp.home_clicked |= signed_in && title.clicked();
                if busy {
                    tui.ui_add(egui::Spinner::new());
                }
            });

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                let theme_label = if light_mode { "Dark mode" } else { "Light mode" };
                resp.theme_clicked |= tui
                    .ui(|ui| cmd_button(ui, theme_label, ButtonKind::Outline, true))
                    .clicked();
                if signed_in {
                    resp.logout_clicked |= tui
                        .ui(|ui| cmd_button(ui, "Logout", ButtonKind::Danger, true))
                        .clicked();
                }
            });
        },
    );

    resp
}
