use crate::theme::*;
use crate::utils::{cmd_button, section_label, ButtonKind};
use crate::DesktopKernel;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

use codepad_app_core::{viewmodel::editor_vm, AppCommand, Route};

#[derive(Default)]
pub struct EditorForm {
    pub confirm_delete: bool,
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    pal: &Palette,
    form: &mut EditorForm,
    kernel: &mut DesktopKernel,
    preview_url: Option<&str>,
) {
    let vm = kernel
        .store
        .with_state(|state| editor_vm(state, kernel.editor()));
    let mut text = kernel.editor().active_text().to_owned();

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(8.0),
        padding: length(8.0),
        size: percent(1.),
        min_size: taffy::Size {
            width: length(0.0),
            height: length(0.0),
        },
        ..Default::default()
    })
    .add(|tui| {
        // Toolbar
        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            justify_content: Some(taffy::JustifyContent::SpaceBetween),
            align_items: Some(taffy::AlignItems::Center),
            gap: length(8.0),
            size: taffy::Size {
                width: percent(1.),
                height: auto(),
            },
            flex_shrink: 0.0,
            ..Default::default()
        })
        .add(|tui| {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                if tui
                    .ui(|ui| cmd_button(ui, "← Home", ButtonKind::Outline, true))
                    .clicked()
                {
                    kernel.dispatch(AppCommand::Navigate(Route::Home));
                }
                tui.label(egui::RichText::new(&vm.title).size(16.0).strong());
                if vm.loading {
                    tui.ui_add(egui::Spinner::new());
                }

                for tab in &vm.tabs {
                    let resp = tui.ui(|ui| ui.selectable_label(tab.active, tab.label));
                    if resp.clicked() && !tab.active {
                        kernel.dispatch(AppCommand::SelectTab(tab.kind));
                    }
                }
            });

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                let save_label = if vm.saving { "Saving…" } else { "Save" };
                if tui
                    .ui(|ui| cmd_button(ui, save_label, ButtonKind::Primary, vm.can_save))
                    .clicked()
                {
                    kernel.dispatch(AppCommand::SaveProject);
                }

                if tui
                    .ui(|ui| cmd_button(ui, "Download", ButtonKind::Outline, !vm.loading))
                    .clicked()
                {
                    let picked = rfd::FileDialog::new()
                        .set_file_name(codepad_config::EXPORT_FILE_NAME)
                        .add_filter("HTML", &["html", "htm"])
                        .save_file();
                    if let Some(path) = picked {
                        kernel.dispatch(AppCommand::ExportDocument(path));
                    }
                }

                let layout_label = if vm.expanded { "Split view" } else { "Expand" };
                if tui
                    .ui(|ui| cmd_button(ui, layout_label, ButtonKind::Outline, true))
                    .clicked()
                {
                    kernel.dispatch(AppCommand::ToggleViewMode);
                }

                if form.confirm_delete {
                    tui.colored_label(COL_DANGER, "Delete this project?");
                    if tui
                        .ui(|ui| cmd_button(ui, "Yes, delete", ButtonKind::Danger, true))
                        .clicked()
                    {
                        form.confirm_delete = false;
                        kernel.dispatch(AppCommand::DeleteProject);
                    }
                    if tui
                        .ui(|ui| cmd_button(ui, "Cancel", ButtonKind::Outline, true))
                        .clicked()
                    {
                        form.confirm_delete = false;
                    }
                } else if tui
                    .ui(|ui| cmd_button(ui, "Delete", ButtonKind::Danger, vm.can_save))
                    .clicked()
                {
                    form.confirm_delete = true;
                }
            });
        });

        // Body: source on the left, preview on the right unless expanded
        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            gap: length(8.0),
            flex_grow: 1.0,
            flex_basis: length(0.0),
            size: taffy::Size {
                width: percent(1.),
                height: auto(),
            },
            min_size: taffy::Size {
                width: length(0.0),
                height: length(0.0),
            },
            ..Default::default()
        })
        .add(|tui| {
            tui.style(taffy::Style {
                flex_grow: 1.0,
                flex_basis: length(0.0),
                size: taffy::Size {
                    width: auto(),
                    height: percent(1.),
                },
                min_size: taffy::Size {
                    width: length(0.0),
                    height: length(0.0),
                },
                ..Default::default()
            })
            .add(|tui| {
                tui.ui(|ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("source")
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let resp = ui.add_enabled(
                                !vm.loading,
                                egui::TextEdit::multiline(&mut text)
                                    .code_editor()
                                    .desired_width(f32::INFINITY)
                                    .desired_rows(32),
                            );
                            if resp.changed() {
                                kernel.dispatch(AppCommand::EditActive(text.clone()));
                            }
                        });
                });
            });

            if vm.expanded {
                return;
            }

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Column,
                gap: length(6.0),
                padding: length(8.0),
                flex_grow: 1.0,
                flex_basis: length(0.0),
                size: taffy::Size {
                    width: auto(),
                    height: percent(1.),
                },
                min_size: taffy::Size {
                    width: length(0.0),
                    height: length(0.0),
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
                        justify_content: Some(taffy::JustifyContent::SpaceBetween),
                        align_items: Some(taffy::AlignItems::Center),
                        size: taffy::Size {
                            width: percent(1.),
                            height: auto(),
                        },
                        ..Default::default()
                    })
                    .add(|tui| {
                        tui.ui(|ui| section_label(ui, "PREVIEW"));
                        if let Some(url) = preview_url {
                            let ready = vm.preview.is_some();
                            if tui
                                .ui(|ui| cmd_button(ui, "Open in browser", ButtonKind::Outline, ready))
                                .clicked()
                            {
                                if let Err(e) = codepad_infra::open_url(url) {
                                    tracing::warn!("failed to open preview: {e}");
                                }
                            }
                        }
                    });

                    match &vm.preview {
                        Some(doc) => {
                            let hint = if preview_url.is_some() {
                                "The open browser tab reloads the page after every render. Source below."
                            } else {
                                "Browser preview unavailable. Showing the composed source."
                            };
                            tui.colored_label(pal.text_dim, hint);
                            tui.ui(|ui| {
                                egui::ScrollArea::both()
                                    .id_salt("preview")
                                    .auto_shrink([false, false])
                                    .show(ui, |ui| {
                                        ui.add(
                                            egui::Label::new(
                                                egui::RichText::new(doc).monospace(),
                                            )
                                            .selectable(true),
                                        );
                                    });
                            });
                        }
                        None => {
                            tui.colored_label(pal.text_dim, "Nothing rendered yet.");
                        }
                    }
                },
            );
        });
    });
}
