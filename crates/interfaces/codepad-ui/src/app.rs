use std::time::{Duration, Instant};

use crate::components::{header, notice};
use crate::screens::{editor, home, login, register};
use crate::theme;
use crate::DesktopKernel;
use eframe::egui;
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, tui, TuiBuilderLogic};

use codepad_app_core::{AppCommand, BootState, Route};

/// How often to look for worker results while something is in flight.
const WORKER_POLL: Duration = Duration::from_millis(50);

pub struct CodepadUiApp {
    kernel: DesktopKernel,
    preview_url: Option<String>,
    applied_light_mode: Option<bool>,

    login: login::LoginForm,
    register: register::RegisterForm,
    home: home::HomeForm,
    editor: editor::EditorForm,
}

impl CodepadUiApp {
    pub fn new(kernel: DesktopKernel, preview_url: Option<String>) -> Self {
        Self {
            kernel,
            preview_url,
            applied_light_mode: None,
            login: Default::default(),
            register: Default::default(),
            home: Default::default(),
            editor: Default::default(),
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let in_flight = self.kernel.store.with_state(|s| {
            matches!(s.boot, BootState::Loading)
                || s.busy
                || s.projects_loading
                || s.editor.as_ref().is_some_and(|m| m.loading || m.saving)
        });
        let mut wait = self
            .kernel
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now));
        if in_flight {
            wait = Some(wait.map_or(WORKER_POLL, |w| w.min(WORKER_POLL)));
        }
        if let Some(wait) = wait {
            ctx.request_repaint_after(wait);
        }
    }
}

impl eframe::App for CodepadUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.kernel.tick(now);

        let state = self.kernel.store.state();
        if self.applied_light_mode != Some(state.light_mode) {
            theme::setup(ctx, state.light_mode);
            self.applied_light_mode = Some(state.light_mode);
        }
        if !matches!(state.route, Route::Editor(_)) {
            self.editor.confirm_delete = false;
        }
        let pal = theme::palette(state.light_mode);
        let signed_in = self.kernel.auth().is_authenticated();

        ctx.options_mut(|options| {
            options.max_passes = std::num::NonZeroUsize::MIN.saturating_add(2);
        });
        ctx.style_mut(|style| {
            style.wrap_mode = Some(egui::TextWrapMode::Extend);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            tui(ui, ui.id().with("root"))
                .reserve_available_space()
                .style(taffy::Style {
                    flex_direction: taffy::FlexDirection::Column,
                    size: percent(1.),
                    min_size: taffy::Size {
                        width: percent(1.),
                        height: length(0.0),
                    },
                    ..Default::default()
                })
                .show(|tui| {
                    tui.style(taffy::Style {
                        size: taffy::Size {
                            width: percent(1.),
                            height: length(48.0),
                        },
                        flex_shrink: 0.0,
                        ..Default::default()
                    })
                    .add(|tui| {
                        let resp =
                            header::draw(tui, &pal, state.light_mode, signed_in, state.busy);
                        if resp.home_clicked {
                            self.kernel.dispatch(AppCommand::Navigate(Route::Home));
                        }
                        if resp.theme_clicked {
                            self.kernel.dispatch(AppCommand::ToggleTheme);
                        }
                        if resp.logout_clicked {
                            self.kernel.dispatch(AppCommand::Logout);
                        }
                    });

                    if let Some(n) = &state.notification {
                        if notice::draw(&mut *tui, n) {
                            self.kernel.dispatch(AppCommand::DismissNotification);
                        }
                    }

                    tui.style(taffy::Style {
                        flex_direction: taffy::FlexDirection::Column,
                        flex_grow: 1.0,
                        flex_basis: length(0.0),
                        size: percent(1.),
                        min_size: taffy::Size {
                            width: length(0.0),
                            height: length(0.0),
                        },
                        overflow: taffy::Point {
                            x: taffy::Overflow::Hidden,
                            y: taffy::Overflow::Hidden,
                        },
                        ..Default::default()
                    })
                    .add(|tui| match (&state.boot, &state.route) {
                        (BootState::Loading, _) => {
                            tui.style(crate::screens::centered()).add(|tui| {
                                tui.ui_add(egui::Spinner::new());
                            });
                        }
                        (BootState::Failed(msg), _) => {
                            tui.style(crate::screens::centered()).add(|tui| {
                                tui.colored_label(theme::COL_DANGER, msg);
                            });
                        }
                        (BootState::Ready, Route::Login) => {
                            login::draw(tui, &pal, &mut self.login, &mut self.kernel)
                        }
                        (BootState::Ready, Route::Register) => {
                            register::draw(tui, &pal, &mut self.register, &mut self.kernel)
                        }
                        (BootState::Ready, Route::Home) => {
                            home::draw(tui, &pal, &mut self.home, &mut self.kernel)
                        }
                        (BootState::Ready, Route::Editor(_)) => editor::draw(
                            tui,
                            &pal,
                            &mut self.editor,
                            &mut self.kernel,
                            self.preview_url.as_deref(),
                        ),
                    });
                });
        });

        self.schedule_repaint(ctx, now);
    }
}
