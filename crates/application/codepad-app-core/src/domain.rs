use codepad_core::{ProjectId, ProjectSummary};

use crate::auth::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum BootState {
    Loading,
    Ready,
    Failed(String),
}

/// Editor view bookkeeping that lives in the store. The buffers themselves
/// live in the kernel's editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorMeta {
    pub project_id: ProjectId,
    pub name: String,
    pub loading: bool,
    pub saving: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub boot: BootState,
    pub route: Route,
    pub light_mode: bool,

    pub projects: Vec<ProjectSummary>,
    pub projects_loading: bool,
    pub search: String,

    pub editor: Option<EditorMeta>,

    pub busy: bool,
    pub notification: Option<Notification>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            boot: BootState::Loading,
            route: Route::Login,
            light_mode: false,
            projects: Vec::new(),
            projects_loading: false,
            search: String::new(),
            editor: None,
            busy: false,
            notification: None,
        }
    }
}
