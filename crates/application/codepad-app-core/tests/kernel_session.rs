use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use codepad_app_core::app_core::{AppCommand, AppStore, DomainEvent};
use codepad_app_core::domain::{AppState, BootState, NotificationLevel};
use codepad_app_core::kernel::AppKernel;
use codepad_app_core::ports::{ClientStore, ProjectGateway};
use codepad_app_core::{MemorySink, Route};
use codepad_core::{Project, ProjectSummary, SourceSet};
use codepad_infra::GatewayError;
use codepad_persistence::ClientState;

#[derive(Default)]
struct FakeGateway {
    deny: AtomicBool,
    fetches: AtomicUsize,
    saved: Mutex<Vec<(String, SourceSet)>>,
}

impl FakeGateway {
    fn denying() -> Self {
        let g = Self::default();
        g.deny.store(true, Ordering::SeqCst);
        g
    }

    fn check(&self) -> Result<(), GatewayError> {
        if self.deny.load(Ordering::SeqCst) {
            Err(GatewayError::AuthDenied(403))
        } else {
            Ok(())
        }
    }
}

impl ProjectGateway for FakeGateway {
    fn login(&self, email: &str, password: &str) -> Result<String, GatewayError> {
        if password == "wrong" {
            return Err(GatewayError::AuthDenied(401));
        }
        Ok(format!("tok-{email}"))
    }

    fn register(&self, _: &str, _: &str, _: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    fn list_projects(&self, _token: &str) -> Result<Vec<ProjectSummary>, GatewayError> {
        self.check()?;
        Ok(vec![
            ProjectSummary {
                id: "fast".into(),
                name: "Fast".into(),
            },
            ProjectSummary {
                id: "slow".into(),
                name: "Slow".into(),
            },
        ])
    }

    fn create_project(
        &self,
        _token: &str,
        name: &str,
        _sources: &SourceSet,
    ) -> Result<ProjectSummary, GatewayError> {
        self.check()?;
        Ok(ProjectSummary {
            id: "new".into(),
            name: name.into(),
        })
    }

    fn fetch_project(&self, _token: &str, id: &str) -> Result<Project, GatewayError> {
        if id == "slow" {
            std::thread::sleep(Duration::from_millis(150));
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Project {
            id: id.into(),
            name: format!("Project {id}"),
            sources: SourceSet::new(format!("<p>{id}</p>"), "", ""),
        })
    }

    fn update_project(
        &self,
        _token: &str,
        id: &str,
        sources: &SourceSet,
    ) -> Result<(), GatewayError> {
        self.check()?;
        self.saved
            .lock()
            .unwrap()
            .push((id.to_owned(), sources.clone()));
        Ok(())
    }

    fn delete_project(&self, _token: &str, _id: &str) -> Result<(), GatewayError> {
        self.check()
    }
}

#[derive(Clone, Default)]
struct MemoryClientStore(Arc<Mutex<ClientState>>);

impl ClientStore for MemoryClientStore {
    fn load(&self) -> anyhow::Result<ClientState> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn save(&self, state: &ClientState) -> anyhow::Result<()> {
        *self.0.lock().unwrap() = state.clone();
        Ok(())
    }
}

type Kernel = AppKernel<FakeGateway, MemoryClientStore, MemorySink>;

fn kernel(gateway: FakeGateway, token: Option<&str>) -> (Kernel, MemoryClientStore) {
    let client = MemoryClientStore::default();
    client.0.lock().unwrap().token = token.map(str::to_owned);
    let kernel = AppKernel::new(
        AppStore::default(),
        gateway,
        client.clone(),
        MemorySink::new(),
        Duration::ZERO,
    );
    (kernel, client)
}

/// Tick until `done` holds for the store, failing after two seconds.
fn settle(kernel: &mut Kernel, done: impl Fn(&AppState) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        kernel.tick(Instant::now());
        if done(&kernel.store.state()) {
            return;
        }
        assert!(Instant::now() < deadline, "kernel did not settle");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn booted_member(gateway: FakeGateway) -> (Kernel, MemoryClientStore) {
    let (mut k, client) = kernel(gateway, Some("tok"));
    k.dispatch(AppCommand::LoadInitialState);
    settle(&mut k, |s| {
        matches!(s.boot, BootState::Ready) && s.route == Route::Home && !s.projects_loading
    });
    (k, client)
}

#[test]
fn denied_list_call_signs_out_and_lands_on_login() {
    let (mut k, client) = kernel(FakeGateway::denying(), Some("stale-token"));
    k.dispatch(AppCommand::LoadInitialState);
    settle(&mut k, |s| s.notification.is_some());

    let state = k.store.state();
    assert_eq!(state.route, Route::Login);
    assert!(!k.auth().is_authenticated());
    assert_eq!(client.0.lock().unwrap().token, None);

    k.dispatch(AppCommand::Navigate(Route::Home));
    assert_eq!(k.store.state().route, Route::Login);
}

#[test]
fn login_persists_the_token_and_goes_home() {
    let (mut k, client) = kernel(FakeGateway::default(), None);
    k.dispatch(AppCommand::LoadInitialState);
    settle(&mut k, |s| matches!(s.boot, BootState::Ready));
    assert_eq!(k.store.state().route, Route::Login);

    k.dispatch(AppCommand::Login {
        email: "a@b.c".into(),
        password: "pw".into(),
    });
    settle(&mut k, |s| s.route == Route::Home && s.projects.len() == 2);
    assert_eq!(client.0.lock().unwrap().token.as_deref(), Some("tok-a@b.c"));

    k.dispatch(AppCommand::Navigate(Route::Login));
    assert_eq!(k.store.state().route, Route::Home);
}

#[test]
fn rejected_credentials_do_not_count_as_revocation() {
    let (mut k, _client) = kernel(FakeGateway::default(), None);
    k.dispatch(AppCommand::Login {
        email: "a@b.c".into(),
        password: "wrong".into(),
    });
    settle(&mut k, |s| s.notification.is_some());
    let n = k.store.state().notification.unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
    assert_eq!(n.message, "Invalid email or password");
}

#[test]
fn slow_load_never_overwrites_a_later_project() {
    let (mut k, _client) = booted_member(FakeGateway::default());

    k.dispatch(AppCommand::OpenProject("slow".into()));
    k.dispatch(AppCommand::OpenProject("fast".into()));
    settle(&mut k, |s| s.editor.as_ref().is_some_and(|m| !m.loading));

    let deadline = Instant::now() + Duration::from_secs(2);
    while k.gateway().fetches.load(Ordering::SeqCst) < 2 {
        assert!(Instant::now() < deadline, "slow fetch never finished");
        std::thread::sleep(Duration::from_millis(5));
    }
    for _ in 0..5 {
        k.tick(Instant::now());
    }

    assert_eq!(k.editor().project_id(), Some("fast"));
    assert_eq!(k.editor().snapshot().markup, "<p>fast</p>");
    assert_eq!(k.store.state().route, Route::Editor("fast".into()));
}

#[test]
fn load_events_for_an_old_request_are_dropped() {
    let (mut k, _client) = booted_member(FakeGateway::default());
    k.dispatch(AppCommand::OpenProject("fast".into()));
    settle(&mut k, |s| s.editor.as_ref().is_some_and(|m| !m.loading));

    k.sender()
        .try_send(DomainEvent::ProjectLoaded {
            request: uuid::Uuid::new_v4(),
            project: Project {
                id: "fast".into(),
                name: "Hijacked".into(),
                sources: SourceSet::new("<p>old</p>", "", ""),
            },
        })
        .unwrap();
    k.tick(Instant::now());

    assert_eq!(k.editor().snapshot().markup, "<p>fast</p>");
    assert_eq!(k.store.state().editor.unwrap().name, "Project fast");
}

#[test]
fn edits_render_and_save_the_working_copy() {
    let (mut k, _client) = booted_member(FakeGateway::default());
    k.dispatch(AppCommand::OpenProject("fast".into()));
    settle(&mut k, |s| s.editor.as_ref().is_some_and(|m| !m.loading));

    k.dispatch(AppCommand::SelectTab(codepad_core::SourceKind::Style));
    k.dispatch(AppCommand::EditActive("p{color:red}".into()));
    k.tick(Instant::now());
    assert_eq!(
        k.editor().compositor().displayed().map(|d| d.as_str()),
        Some("<p>fast</p><style>p{color:red}</style><script></script>")
    );

    k.dispatch(AppCommand::SaveProject);
    settle(&mut k, |s| s.editor.as_ref().is_some_and(|m| !m.saving));
    let saved = k.gateway().saved.lock().unwrap().clone();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "fast");
    assert_eq!(saved[0].1.style, "p{color:red}");
}

#[test]
fn export_writes_what_the_preview_shows() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("code.html");

    let (mut k, _client) = booted_member(FakeGateway::default());
    k.dispatch(AppCommand::OpenProject("fast".into()));
    settle(&mut k, |s| s.editor.as_ref().is_some_and(|m| !m.loading));
    k.tick(Instant::now());

    k.dispatch(AppCommand::ExportDocument(target.clone()));
    settle(&mut k, |s| {
        s.notification
            .as_ref()
            .is_some_and(|n| n.level == NotificationLevel::Success)
    });

    let written = std::fs::read_to_string(&target).unwrap();
    let shown = k.editor().compositor().sink().content().unwrap().as_str();
    assert_eq!(written, shown);
}

#[test]
fn deleting_the_open_project_returns_home() {
    let (mut k, _client) = booted_member(FakeGateway::default());
    k.dispatch(AppCommand::OpenProject("fast".into()));
    settle(&mut k, |s| s.editor.as_ref().is_some_and(|m| !m.loading));

    k.dispatch(AppCommand::DeleteProject);
    settle(&mut k, |s| s.route == Route::Home && !s.busy);
    assert!(!k.editor().is_open());
    assert!(k.editor().compositor().sink().content().is_none());
}

#[test]
fn theme_toggle_is_persisted() {
    let (mut k, client) = booted_member(FakeGateway::default());
    k.dispatch(AppCommand::ToggleTheme);
    assert!(k.store.state().light_mode);
    assert!(client.0.lock().unwrap().light_mode);
    assert_eq!(client.0.lock().unwrap().token.as_deref(), Some("tok"));
}

fn assert_signed_out(k: &Kernel, client: &MemoryClientStore) {
    let state = k.store.state();
    assert_eq!(state.route, Route::Login);
    assert!(state.editor.is_none());
    assert!(!k.auth().is_authenticated());
    assert!(!k.editor().is_open());
    assert_eq!(client.0.lock().unwrap().token, None);
}

fn open_then_revoke(k: &mut Kernel) {
    k.dispatch(AppCommand::OpenProject("fast".into()));
    settle(k, |s| s.editor.as_ref().is_some_and(|m| !m.loading));
    k.gateway().deny.store(true, Ordering::SeqCst);
}

#[test]
fn denied_save_signs_out_from_the_editor() {
    let (mut k, client) = booted_member(FakeGateway::default());
    open_then_revoke(&mut k);

    k.dispatch(AppCommand::SaveProject);
    settle(&mut k, |s| s.route == Route::Login);
    assert_signed_out(&k, &client);
    assert!(k.gateway().saved.lock().unwrap().is_empty());
}

#[test]
fn denied_delete_signs_out_from_the_editor() {
    let (mut k, client) = booted_member(FakeGateway::default());
    open_then_revoke(&mut k);

    k.dispatch(AppCommand::DeleteProject);
    settle(&mut k, |s| s.route == Route::Login);
    assert_signed_out(&k, &client);
}

#[test]
fn denied_project_load_signs_out() {
    let (mut k, client) = booted_member(FakeGateway::default());
    k.gateway().deny.store(true, Ordering::SeqCst);

    k.dispatch(AppCommand::OpenProject("fast".into()));
    settle(&mut k, |s| s.route == Route::Login);
    assert_signed_out(&k, &client);
    assert!(k.editor().snapshot().markup.is_empty());
}
