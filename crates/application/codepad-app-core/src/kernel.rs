use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use codepad_core::{ProjectId, SourceSet};
use codepad_infra::GatewayError;
use codepad_persistence::ClientState;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::auth::{guard, AuthContext, Navigation, Route};
use crate::compositor::{RenderOutcome, RenderSink};
use crate::domain::Notification;
use crate::editor::EditorSession;
use crate::ports::{ClientStore, ProjectGateway};

pub struct AppKernel<G, C, S: RenderSink> {
    pub store: AppStore,
    auth: AuthContext,
    gateway: Arc<G>,
    client_store: Arc<C>,
    editor: EditorSession<S>,

    load_request: Option<Uuid>,
    load_cancel: Option<CancellationToken>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<G, C, S> AppKernel<G, C, S>
where
    G: ProjectGateway,
    C: ClientStore,
    S: RenderSink,
{
    pub fn new(store: AppStore, gateway: G, client_store: C, sink: S, quiet: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            store,
            auth: AuthContext::default(),
            gateway: Arc::new(gateway),
            client_store: Arc::new(client_store),
            editor: EditorSession::new(sink, quiet),
            load_request: None,
            load_cancel: None,
            tx,
            rx,
        }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn editor(&self) -> &EditorSession<S> {
        &self.editor
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// When the next debounced render is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.editor.compositor().next_deadline()
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        self.dispatch_at(cmd, Instant::now());
    }

    pub fn dispatch_at(&mut self, cmd: AppCommand, now: Instant) {
        match cmd {
            AppCommand::LoadInitialState => {
                let client_store = self.client_store.clone();
                self.spawn_worker("codepad-load-client-state", move |tx| {
                    match client_store.load() {
                        Ok(state) => {
                            let _ = tx.blocking_send(DomainEvent::InitialStateLoaded {
                                token: state.token().map(str::to_owned),
                                light_mode: state.light_mode,
                            });
                        }
                        Err(e) => {
                            let _ = tx.blocking_send(DomainEvent::BootFailed {
                                message: format!("{e:#}"),
                            });
                        }
                    }
                });
            }

            AppCommand::Navigate(route) => self.navigate(route),

            AppCommand::Login { email, password } => {
                let email = email.trim().to_owned();
                if email.is_empty() || password.is_empty() {
                    self.notify(Notification::error("Email and password are required"));
                    return;
                }
                self.store.apply(DomainEvent::RequestStarted);
                let gateway = self.gateway.clone();
                self.spawn_worker("codepad-login", move |tx| {
                    match gateway.login(&email, &password) {
                        Ok(token) => {
                            let _ = tx.blocking_send(DomainEvent::LoggedIn { token });
                        }
                        Err(e) => {
                            // A denial here means bad credentials, not a lost session.
                            let message = if e.is_auth_denied() {
                                "Invalid email or password".to_owned()
                            } else {
                                format!("Login failed: {e}")
                            };
                            warn!(error = %e, "login failed");
                            let _ = tx.blocking_send(DomainEvent::RequestFinished);
                            let _ = tx
                                .blocking_send(DomainEvent::Notify(Notification::error(message)));
                        }
                    }
                });
            }

            AppCommand::Register {
                username,
                email,
                password,
            } => {
                let username = username.trim().to_owned();
                let email = email.trim().to_owned();
                if username.is_empty() || email.is_empty() || password.is_empty() {
                    self.notify(Notification::error("All fields are required"));
                    return;
                }
                self.store.apply(DomainEvent::RequestStarted);
                let gateway = self.gateway.clone();
                self.spawn_worker("codepad-register", move |tx| {
                    match gateway.register(&username, &email, &password) {
                        Ok(()) => {
                            let _ = tx.blocking_send(DomainEvent::RegistrationSucceeded);
                        }
                        Err(e) => {
                            warn!(error = %e, "registration failed");
                            let _ = tx.blocking_send(DomainEvent::RequestFinished);
                            let _ = tx.blocking_send(DomainEvent::Notify(Notification::error(
                                format!("Registration failed: {e}"),
                            )));
                        }
                    }
                });
            }

            AppCommand::Logout => {
                if self.auth.clear() {
                    info!("signed out");
                }
                self.persist();
                self.close_editor();
                self.store.apply(DomainEvent::LoggedOut);
                self.navigate(Route::Login);
            }

            AppCommand::RefreshProjects => self.refresh_projects(),

            AppCommand::SetSearch(s) => self.store.apply(DomainEvent::SearchChanged(s)),

            AppCommand::CreateProject { name } => {
                let name = name.trim().to_owned();
                if name.is_empty() {
                    self.notify(Notification::error("Project name cannot be empty"));
                    return;
                }
                let Some(token) = self.member_token() else {
                    return;
                };
                self.store.apply(DomainEvent::RequestStarted);
                let gateway = self.gateway.clone();
                self.spawn_worker("codepad-create-project", move |tx| {
                    let starter = SourceSet::new(
                        codepad_config::STARTER_MARKUP,
                        codepad_config::STARTER_STYLE,
                        codepad_config::STARTER_SCRIPT,
                    );
                    match gateway.create_project(&token, &name, &starter) {
                        Ok(summary) => {
                            info!(id = %summary.id, "project created");
                            let _ = tx.blocking_send(DomainEvent::ProjectCreated(summary));
                        }
                        Err(e) => report_failure(
                            &tx,
                            e,
                            "Failed to create project",
                            DomainEvent::RequestFinished,
                        ),
                    }
                });
            }

            AppCommand::OpenProject(id) => self.navigate(Route::Editor(id)),

            AppCommand::SelectTab(tab) => self.editor.select_tab(tab),

            AppCommand::EditActive(text) => {
                if self.editor.is_open() {
                    self.editor.edit_active(text, now);
                }
            }

            AppCommand::ToggleViewMode => {
                let mode = self.editor.toggle_view_mode(now);
                debug!(?mode, "view mode toggled");
            }

            AppCommand::SaveProject => {
                let Some(id) = self.editor.project_id().map(str::to_owned) else {
                    return;
                };
                let Some(token) = self.member_token() else {
                    return;
                };
                let sources = self.editor.snapshot();
                self.store.apply(DomainEvent::SaveStarted);
                let gateway = self.gateway.clone();
                self.spawn_worker("codepad-save-project", move |tx| {
                    match gateway.update_project(&token, &id, &sources) {
                        Ok(()) => {
                            info!(%id, "project saved");
                            let _ = tx.blocking_send(DomainEvent::ProjectSaved);
                        }
                        Err(e) => {
                            report_failure(&tx, e, "Failed to save project", DomainEvent::SaveFailed)
                        }
                    }
                });
            }

            AppCommand::DeleteProject => {
                let Some(id) = self.editor.project_id().map(str::to_owned) else {
                    return;
                };
                let Some(token) = self.member_token() else {
                    return;
                };
                self.store.apply(DomainEvent::RequestStarted);
                let gateway = self.gateway.clone();
                self.spawn_worker("codepad-delete-project", move |tx| {
                    match gateway.delete_project(&token, &id) {
                        Ok(()) => {
                            info!(%id, "project deleted");
                            let _ = tx.blocking_send(DomainEvent::ProjectDeleted(id));
                        }
                        Err(e) => report_failure(
                            &tx,
                            e,
                            "Failed to delete project",
                            DomainEvent::RequestFinished,
                        ),
                    }
                });
            }

            AppCommand::ExportDocument(path) => self.export(path),

            AppCommand::ToggleTheme => {
                let light_mode = !self.store.with_state(|s| s.light_mode);
                self.store.apply(DomainEvent::ThemeChanged { light_mode });
                self.persist();
            }

            AppCommand::DismissNotification => {
                self.store.apply(DomainEvent::NotificationDismissed)
            }
        }
    }

    /// Drain worker events, then fire the pending render if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<RenderOutcome> {
        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                DomainEvent::InitialStateLoaded { token, light_mode } => {
                    if let Some(token) = token.clone() {
                        self.auth.set(token);
                    }
                    self.store
                        .apply(DomainEvent::InitialStateLoaded { token, light_mode });
                    self.navigate(Route::Home);
                }

                DomainEvent::LoggedIn { token } => {
                    info!("signed in");
                    self.auth.set(token.clone());
                    self.persist();
                    self.store.apply(DomainEvent::LoggedIn { token });
                    self.navigate(Route::Home);
                }

                DomainEvent::AuthRevoked => {
                    // Several in-flight calls can be denied at once.
                    if !self.auth.clear() {
                        continue;
                    }
                    warn!("authorization denied, session cleared");
                    self.persist();
                    self.close_editor();
                    self.store.apply(DomainEvent::AuthRevoked);
                    self.navigate(Route::Login);
                }

                DomainEvent::RegistrationSucceeded => {
                    self.store.apply(DomainEvent::RegistrationSucceeded);
                    self.navigate(Route::Login);
                }

                DomainEvent::ProjectLoaded { request, project } => {
                    if self.load_request != Some(request) {
                        debug!(%request, id = %project.id, "dropping stale project load");
                        continue;
                    }
                    self.load_request = None;
                    self.load_cancel = None;
                    self.editor.load_project(project.clone(), now);
                    self.store
                        .apply(DomainEvent::ProjectLoaded { request, project });
                }

                DomainEvent::ProjectLoadFailed { request } => {
                    if self.load_request != Some(request) {
                        continue;
                    }
                    self.load_request = None;
                    self.load_cancel = None;
                    self.store.apply(DomainEvent::ProjectLoadFailed { request });
                }

                DomainEvent::ProjectDeleted(id) => {
                    let was_open = self.editor.project_id() == Some(id.as_str());
                    self.store.apply(DomainEvent::ProjectDeleted(id));
                    if was_open {
                        self.navigate(Route::Home);
                    }
                }

                other => self.store.apply(other),
            }
        }

        let outcome = self.editor.poll(now);
        if let Some(outcome) = outcome {
            debug!(?outcome, "render pass");
        }
        outcome
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }

    fn navigate(&mut self, requested: Route) {
        let nav = guard(self.auth.state(), requested);
        if let Navigation::Redirect { from, to } = &nav {
            info!(from = %from.path(), to = %to.path(), "navigation redirected");
        }
        let target = nav.into_route();
        let current = self.store.with_state(|s| s.route.clone());
        let reopen = current != target || !self.editor.is_open();

        if matches!(current, Route::Editor(_)) && current != target {
            self.close_editor();
        }
        self.store.apply(DomainEvent::RouteChanged(target.clone()));

        match target {
            Route::Home => self.refresh_projects(),
            Route::Editor(id) if reopen => self.load_project(id),
            _ => {}
        }
    }

    fn load_project(&mut self, id: ProjectId) {
        let Some(token) = self.member_token() else {
            return;
        };
        self.cancel_load();
        self.editor.close();

        let request = Uuid::new_v4();
        let cancel = CancellationToken::new();
        self.load_request = Some(request);
        self.load_cancel = Some(cancel.clone());
        self.store
            .apply(DomainEvent::ProjectRequested { id: id.clone() });

        let gateway = self.gateway.clone();
        self.spawn_worker("codepad-load-project", move |tx| {
            let res = gateway.fetch_project(&token, &id);
            if cancel.is_cancelled() {
                debug!(%id, "project load cancelled");
                return;
            }
            match res {
                Ok(project) => {
                    let _ = tx.blocking_send(DomainEvent::ProjectLoaded { request, project });
                }
                Err(e) => report_failure(
                    &tx,
                    e,
                    "Failed to load project",
                    DomainEvent::ProjectLoadFailed { request },
                ),
            }
        });
    }

    fn refresh_projects(&mut self) {
        let Some(token) = self.member_token() else {
            return;
        };
        self.store.apply(DomainEvent::ProjectsRequested);
        let gateway = self.gateway.clone();
        self.spawn_worker("codepad-list-projects", move |tx| {
            match gateway.list_projects(&token) {
                Ok(projects) => {
                    debug!(count = projects.len(), "projects listed");
                    let _ = tx.blocking_send(DomainEvent::ProjectsLoaded(projects));
                }
                Err(e) => report_failure(
                    &tx,
                    e,
                    "Failed to fetch projects",
                    DomainEvent::ProjectsFailed,
                ),
            }
        });
    }

    fn export(&mut self, path: PathBuf) {
        let document = self.editor.export_document();
        self.spawn_worker("codepad-export", move |tx| {
            let notification = match codepad_persistence::atomic_write(&path, document.export_bytes())
            {
                Ok(()) => {
                    info!(path = %path.display(), bytes = document.len(), "document exported");
                    Notification::success(format!("Exported to {}", path.display()))
                }
                Err(e) => {
                    warn!(path = %path.display(), "export failed: {e}");
                    Notification::error(format!("Export failed: {e}"))
                }
            };
            let _ = tx.blocking_send(DomainEvent::Notify(notification));
        });
    }

    fn close_editor(&mut self) {
        self.cancel_load();
        self.editor.close();
        self.store.apply(DomainEvent::EditorClosed);
    }

    fn cancel_load(&mut self) {
        if let Some(cancel) = self.load_cancel.take() {
            cancel.cancel();
        }
        self.load_request = None;
    }

    /// The current token. Without one, the gate is re-run and `None` returned.
    fn member_token(&mut self) -> Option<String> {
        let token = self.auth.token();
        if token.is_none() {
            self.navigate(Route::Login);
        }
        token
    }

    fn persist(&mut self) {
        let state = ClientState {
            token: self.auth.token(),
            light_mode: self.store.with_state(|s| s.light_mode),
        };
        if let Err(e) = self.client_store.save(&state) {
            warn!("failed to persist client state: {e:#}");
            self.notify(Notification::error(format!("Failed to save settings: {e}")));
        }
    }

    fn notify(&self, notification: Notification) {
        self.store.apply(DomainEvent::Notify(notification));
    }

    fn spawn_worker<F>(&self, name: &str, job: F)
    where
        F: FnOnce(mpsc::Sender<DomainEvent>) + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawn_res = std::thread::Builder::new()
            .name(name.into())
            .spawn(move || job(tx));
        if let Err(e) = spawn_res {
            self.store.apply(DomainEvent::RequestFinished);
            self.notify(Notification::error(format!(
                "Failed to start {name} worker thread: {e}"
            )));
        }
    }
}

/// Send the failure event, then either revoke the session or surface the error.
fn report_failure(
    tx: &mpsc::Sender<DomainEvent>,
    err: GatewayError,
    context: &str,
    failed: DomainEvent,
) {
    warn!(error = %err, "{context}");
    let _ = tx.blocking_send(failed);
    if err.is_auth_denied() {
        let _ = tx.blocking_send(DomainEvent::AuthRevoked);
    } else {
        let _ = tx.blocking_send(DomainEvent::Notify(Notification::error(format!(
            "{context}: {err}"
        ))));
    }
}
