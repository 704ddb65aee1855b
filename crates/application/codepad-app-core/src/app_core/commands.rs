use std::path::PathBuf;

use codepad_core::{ProjectId, SourceKind};

use crate::auth::Route;

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Boot
    LoadInitialState,

    // Navigation
    Navigate(Route),

    // Session
    Login { email: String, password: String },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,

    // Home
    RefreshProjects,
    SetSearch(String),
    CreateProject { name: String },
    OpenProject(ProjectId),

    // Editor
    SelectTab(SourceKind),
    EditActive(String),
    ToggleViewMode,
    SaveProject,
    DeleteProject,
    ExportDocument(PathBuf),

    // Cosmetics
    ToggleTheme,
    DismissNotification,
}
