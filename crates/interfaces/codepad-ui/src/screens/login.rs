use crate::components::forms::text_field;
use crate::theme::Palette;
use crate::utils::{cmd_button, link_button, ButtonKind};
use crate::DesktopKernel;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::TuiBuilderLogic;

use codepad_app_core::{AppCommand, Route};

#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    pal: &Palette,
    form: &mut LoginForm,
    kernel: &mut DesktopKernel,
) {
    let busy = kernel.store.with_state(|s| s.busy);

    tui.style(super::centered()).add(|tui| {
        tui.style(super::card_style()).bg_add(
            TuiBackground::new()
                .with_background_color(pal.bg_raised)
                .with_border_color(pal.border)
                .with_border_width(1.0),
            |tui| {
                tui.label(egui::RichText::new("Login").size(22.0).strong());

                let mut submit = text_field(&mut *tui, "EMAIL", &mut form.email, "you@example.com", false);
                submit |= text_field(&mut *tui, "PASSWORD", &mut form.password, "", true);

                submit |= tui
                    .ui(|ui| cmd_button(ui, "Login", ButtonKind::Primary, !busy))
                    .clicked();
                if submit && !busy {
                    kernel.dispatch(AppCommand::Login {
                        email: form.email.clone(),
                        password: std::mem::take(&mut form.password),
                    });
                }

                tui.ui(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Don't have an account?");
                        if link_button(ui, "Register").clicked() {
                            kernel.dispatch(AppCommand::Navigate(Route::Register));
                        }
                    });
                });
            },
        );
    });
}
