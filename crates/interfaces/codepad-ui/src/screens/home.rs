use crate::theme::*;
use crate::utils::{cmd_button, section_label, ButtonKind};
use crate::DesktopKernel;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

use codepad_app_core::{viewmodel::home_vm, AppCommand};

#[derive(Default)]
pub struct HomeForm {
    pub new_project: String,
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    pal: &Palette,
    form: &mut HomeForm,
    kernel: &mut DesktopKernel,
) {
    let vm = kernel.store.with_state(home_vm);
    let mut search = kernel.store.with_state(|s| s.search.clone());

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(12.0),
        padding: length(16.0),
        size: percent(1.),
        min_size: taffy::Size {
            width: length(0.0),
            height: length(0.0),
        },
        overflow: taffy::Point {
            x: taffy::Overflow::Hidden,
            y: taffy::Overflow::Scroll,
        },
        ..Default::default()
    })
    .add(|tui| {
        // Toolbar: search on the left, create on the right
        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            justify_content: Some(taffy::JustifyContent::SpaceBetween),
            align_items: Some(taffy::AlignItems::Center),
            gap: length(12.0),
            size: taffy::Size {
                width: percent(1.),
                height: auto(),
            },
            ..Default::default()
        })
        .add(|tui| {
            let search_resp = tui.ui_add(
                egui::TextEdit::singleline(&mut search)
                    .hint_text("Search projects…")
                    .desired_width(260.0),
            );
            if search_resp.changed() {
                kernel.dispatch(AppCommand::SetSearch(search.clone()));
            }

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                let name = tui.ui_add(
                    egui::TextEdit::singleline(&mut form.new_project)
                        .hint_text("New project name")
                        .desired_width(200.0),
                );
                let entered =
                    name.lost_focus() && name.ctx.input(|i| i.key_pressed(egui::Key::Enter));
                let can_create = !vm.busy && !form.new_project.trim().is_empty();
                let clicked = tui
                    .ui(|ui| cmd_button(ui, "+ Create", ButtonKind::Primary, can_create))
                    .clicked();
                if can_create && (clicked || entered) {
                    kernel.dispatch(AppCommand::CreateProject {
                        name: std::mem::take(&mut form.new_project),
                    });
                }
            });
        });

        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            align_items: Some(taffy::AlignItems::Center),
            gap: length(8.0),
            ..Default::default()
        })
        .add(|tui| {
            tui.ui(|ui| section_label(ui, "YOUR PROJECTS"));
            if vm.loading {
                tui.ui_add(egui::Spinner::new());
            }
            if tui.ui(|ui| ui.small_button("⟳")).clicked() {
                kernel.dispatch(AppCommand::RefreshProjects);
            }
        });

        if let Some(hint) = vm.empty_hint {
            tui.colored_label(pal.text_dim, hint);
            return;
        }

        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            flex_wrap: taffy::FlexWrap::Wrap,
            gap: length(12.0),
            size: taffy::Size {
                width: percent(1.),
                height: auto(),
            },
            ..Default::default()
        })
        .add(|tui| {
            for card in &vm.projects {
                tui.style(taffy::Style {
                    flex_direction: taffy::FlexDirection::Column,
                    align_items: Some(taffy::AlignItems::Center),
                    gap: length(8.0),
                    padding: length(12.0),
                    size: taffy::Size {
                        width: length(180.0),
                        height: auto(),
                    },
                    ..Default::default()
                })
                .bg_add(
                    TuiBackground::new()
                        .with_background_color(pal.bg_raised)
                        .with_border_color(pal.border)
                        .with_border_width(1.0),
                    |tui| {
                        tui.label(
                            egui::RichText::new(card.initial.to_string())
                                .size(28.0)
                                .strong()
                                .color(COL_ACCENT),
                        );
                        tui.label(egui::RichText::new(&card.name).strong().color(pal.text));
                        if tui
                            .ui(|ui| cmd_button(ui, "Open", ButtonKind::Outline, true))
                            .clicked()
                        {
                            kernel.dispatch(AppCommand::OpenProject(card.id.clone()));
                        }
                    },
                );
            }
        });
    });
}
