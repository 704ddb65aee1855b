use codepad_core::{ProjectId, SourceKind, ViewMode};

use crate::compositor::RenderSink;
use crate::domain::AppState;
use crate::editor::EditorSession;

#[derive(Debug, Clone)]
pub struct ProjectCardVm {
    pub id: ProjectId,
    pub name: String,
    pub initial: char,
}

#[derive(Debug, Clone)]
pub struct HomeVm {
    pub projects: Vec<ProjectCardVm>,
    pub loading: bool,
    pub busy: bool,
    /// Shown instead of the grid when `projects` is empty.
    pub empty_hint: Option<&'static str>,
}

pub fn home_vm(state: &AppState) -> HomeVm {
    let projects: Vec<ProjectCardVm> = state
        .projects
        .iter()
        .filter(|p| p.matches(&state.search))
        .map(|p| ProjectCardVm {
            id: p.id.clone(),
            name: p.name.clone(),
            initial: p
                .name
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('?'),
        })
        .collect();

    let empty_hint = match (projects.is_empty(), state.projects.is_empty()) {
        (false, _) => None,
        _ if state.projects_loading => None,
        (true, true) => Some("No projects yet. Create one to get started."),
        (true, false) => Some("No projects match your search."),
    };

    HomeVm {
        projects,
        loading: state.projects_loading,
        busy: state.busy,
        empty_hint,
    }
}

#[derive(Debug, Clone)]
pub struct TabVm {
    pub kind: SourceKind,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct EditorVm {
    pub title: String,
    pub tabs: Vec<TabVm>,
    pub expanded: bool,
    pub loading: bool,
    pub saving: bool,
    pub can_save: bool,
    /// Source of the document the preview currently holds.
    pub preview: Option<String>,
}

pub fn editor_vm<S: RenderSink>(state: &AppState, session: &EditorSession<S>) -> EditorVm {
    let meta = state.editor.as_ref();
    let loading = meta.is_some_and(|m| m.loading);
    let saving = meta.is_some_and(|m| m.saving);
    let title = match meta {
        Some(m) if !m.name.is_empty() => m.name.clone(),
        Some(_) if loading => "Loading…".into(),
        _ => "Untitled".into(),
    };

    EditorVm {
        title,
        tabs: SourceKind::ALL
            .iter()
            .map(|&kind| TabVm {
                kind,
                label: kind.label(),
                active: kind == session.active_tab(),
            })
            .collect(),
        expanded: session.view_mode() == ViewMode::Expanded,
        loading,
        saving,
        can_save: session.is_open() && !loading && !saving,
        preview: session
            .compositor()
            .displayed()
            .map(|d| d.as_str().to_owned()),
    }
}
