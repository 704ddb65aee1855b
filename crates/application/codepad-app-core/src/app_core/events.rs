use codepad_core::{Project, ProjectId, ProjectSummary};
use uuid::Uuid;

use crate::auth::Route;
use crate::domain::Notification;

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Boot state
    InitialStateLoaded {
        token: Option<String>,
        light_mode: bool,
    },
    BootFailed { message: String },

    // Navigation
    RouteChanged(Route),

    // Session
    LoggedIn { token: String },
    LoggedOut,
    AuthRevoked,
    RegistrationSucceeded,

    // Home
    ProjectsRequested,
    ProjectsLoaded(Vec<ProjectSummary>),
    ProjectsFailed,
    ProjectCreated(ProjectSummary),
    SearchChanged(String),

    // Editor
    ProjectRequested { id: ProjectId },
    ProjectLoaded { request: Uuid, project: Project },
    ProjectLoadFailed { request: Uuid },
    SaveStarted,
    ProjectSaved,
    SaveFailed,
    ProjectDeleted(ProjectId),
    EditorClosed,

    // Misc
    RequestStarted,
    RequestFinished,
    ThemeChanged { light_mode: bool },
    Notify(Notification),
    NotificationDismissed,
}
