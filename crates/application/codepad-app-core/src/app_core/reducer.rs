use crate::auth::Route;
use crate::domain::{AppState, BootState, EditorMeta, Notification};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::InitialStateLoaded { light_mode, .. } => {
            state.light_mode = light_mode;
            state.boot = BootState::Ready;
        }

        DomainEvent::BootFailed { message } => {
            state.boot = BootState::Failed(message);
        }

        DomainEvent::RouteChanged(r) => {
            if !matches!(r, Route::Editor(_)) {
                state.editor = None;
            }
            state.route = r;
        }

        DomainEvent::LoggedIn { .. } => {
            state.busy = false;
            state.notification = None;
        }

        DomainEvent::LoggedOut => clear_session(&mut state),

        DomainEvent::AuthRevoked => {
            clear_session(&mut state);
            state.notification = Some(Notification::error(
                "Your session has expired. Please log in again.",
            ));
        }

        DomainEvent::RegistrationSucceeded => {
            state.busy = false;
            state.notification = Some(Notification::success(
                "Registration successful. Please log in.",
            ));
        }

        DomainEvent::ProjectsRequested => state.projects_loading = true,
        DomainEvent::ProjectsLoaded(projects) => {
            state.projects = projects;
            state.projects_loading = false;
        }
        DomainEvent::ProjectsFailed => state.projects_loading = false,

        DomainEvent::ProjectCreated(summary) => {
            state.busy = false;
            if !state.projects.iter().any(|p| p.id == summary.id) {
                state.projects.push(summary);
            }
        }

        DomainEvent::SearchChanged(s) => state.search = s,

        DomainEvent::ProjectRequested { id } => {
            state.editor = Some(EditorMeta {
                project_id: id,
                name: String::new(),
                loading: true,
                saving: false,
            });
        }

        DomainEvent::ProjectLoaded { project, .. } => {
            if let Some(meta) = state
                .editor
                .as_mut()
                .filter(|m| m.project_id == project.id)
            {
                meta.name = project.name;
                meta.loading = false;
            }
        }

        DomainEvent::ProjectLoadFailed { .. } => {
            if let Some(meta) = state.editor.as_mut() {
                meta.loading = false;
            }
        }

        DomainEvent::SaveStarted => set_saving(&mut state, true),
        DomainEvent::ProjectSaved => {
            set_saving(&mut state, false);
            state.notification = Some(Notification::success("Project saved"));
        }
        DomainEvent::SaveFailed => set_saving(&mut state, false),

        DomainEvent::ProjectDeleted(id) => {
            state.busy = false;
            state.projects.retain(|p| p.id != id);
            if state.editor.as_ref().is_some_and(|m| m.project_id == id) {
                state.editor = None;
            }
        }

        DomainEvent::EditorClosed => state.editor = None,

        DomainEvent::RequestStarted => state.busy = true,
        DomainEvent::RequestFinished => state.busy = false,

        DomainEvent::ThemeChanged { light_mode } => state.light_mode = light_mode,

        DomainEvent::Notify(n) => state.notification = Some(n),
        DomainEvent::NotificationDismissed => state.notification = None,
    }
    state
}

fn clear_session(state: &mut AppState) {
    state.projects.clear();
    state.projects_loading = false;
    state.search.clear();
    state.editor = None;
    state.busy = false;
}

fn set_saving(state: &mut AppState, saving: bool) {
    if let Some(meta) = state.editor.as_mut() {
        meta.saving = saving;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepad_core::{Project, ProjectSummary, SourceSet};
    use uuid::Uuid;

    fn summary(id: &str, name: &str) -> ProjectSummary {
        ProjectSummary {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn revocation_wipes_member_data_and_explains_why() {
        let mut state = AppState::default();
        state.projects = vec![summary("1", "a")];
        state.search = "a".into();
        state.busy = true;

        let state = reduce(state, DomainEvent::AuthRevoked);
        assert!(state.projects.is_empty());
        assert!(state.search.is_empty());
        assert!(!state.busy);
        assert!(state.notification.is_some());
    }

    #[test]
    fn load_only_updates_the_matching_editor() {
        let state = reduce(
            AppState::default(),
            DomainEvent::ProjectRequested { id: "p2".into() },
        );
        let state = reduce(
            state,
            DomainEvent::ProjectLoaded {
                request: Uuid::new_v4(),
                project: Project {
                    id: "p1".into(),
                    name: "Old".into(),
                    sources: SourceSet::default(),
                },
            },
        );
        let meta = state.editor.expect("editor meta");
        assert!(meta.loading);
        assert!(meta.name.is_empty());
    }

    #[test]
    fn leaving_the_editor_drops_its_meta() {
        let state = reduce(
            AppState::default(),
            DomainEvent::ProjectRequested { id: "p".into() },
        );
        let state = reduce(state, DomainEvent::RouteChanged(Route::Home));
        assert!(state.editor.is_none());
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn created_projects_are_not_listed_twice() {
        let mut state = AppState::default();
        state.projects = vec![summary("1", "a")];
        let state = reduce(state, DomainEvent::ProjectCreated(summary("1", "a")));
        let state = reduce(state, DomainEvent::ProjectCreated(summary("2", "b")));
        assert_eq!(state.projects.len(), 2);
    }
}
