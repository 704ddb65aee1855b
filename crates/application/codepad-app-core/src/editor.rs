use std::time::{Duration, Instant};

use codepad_core::{Document, Project, ProjectId, SourceKind, SourceSet, ViewMode};

use crate::compositor::{Compositor, RenderOutcome, RenderSink};

/// Working state of the editor view: the compositor plus tab and layout.
pub struct EditorSession<S: RenderSink> {
    compositor: Compositor<S>,
    active_tab: SourceKind,
    view_mode: ViewMode,
    project_id: Option<ProjectId>,
    project_name: String,
}

impl<S: RenderSink> EditorSession<S> {
    pub fn new(sink: S, quiet: Duration) -> Self {
        Self {
            compositor: Compositor::new(sink, quiet),
            active_tab: SourceKind::default(),
            view_mode: ViewMode::default(),
            project_id: None,
            project_name: String::new(),
        }
    }

    pub fn compositor(&self) -> &Compositor<S> {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor<S> {
        &mut self.compositor
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn is_open(&self) -> bool {
        self.project_id.is_some()
    }

    pub fn active_tab(&self) -> SourceKind {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: SourceKind) {
        self.active_tab = tab;
    }

    pub fn active_text(&self) -> &str {
        self.compositor.sources().get(self.active_tab)
    }

    pub fn edit_active(&mut self, text: impl Into<String>, now: Instant) {
        let tab = self.active_tab;
        self.compositor.set_buffer(tab, text, now);
    }

    pub fn set_buffer(&mut self, which: SourceKind, text: impl Into<String>, now: Instant) {
        self.compositor.set_buffer(which, text, now);
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Flip split/expanded. Buffers are untouched; a render pass is armed.
    pub fn toggle_view_mode(&mut self, now: Instant) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.compositor.set_visible(self.view_mode.shows_preview(), now);
        self.view_mode
    }

    /// Take over a freshly loaded project: all three buffers are replaced
    /// and the view starts over on the markup tab in split mode.
    pub fn load_project(&mut self, project: Project, now: Instant) {
        self.project_id = Some(project.id);
        self.project_name = project.name;
        self.active_tab = SourceKind::Markup;
        if self.view_mode != ViewMode::Split {
            self.view_mode = ViewMode::Split;
            self.compositor.set_visible(true, now);
        }
        self.compositor.replace_sources(project.sources, now);
    }

    pub fn close(&mut self) {
        self.project_id = None;
        self.project_name.clear();
        self.active_tab = SourceKind::Markup;
        if self.view_mode != ViewMode::Split {
            self.view_mode = ViewMode::Split;
            self.compositor.set_visible(true, Instant::now());
        }
        // Must come after set_visible, which arms a render.
        self.compositor.reset();
    }

    pub fn snapshot(&self) -> SourceSet {
        self.compositor.sources().clone()
    }

    pub fn poll(&mut self, now: Instant) -> Option<RenderOutcome> {
        self.compositor.poll(now)
    }

    /// What an export should contain: the displayed document, or the
    /// current composition when nothing is displayed.
    pub fn export_document(&self) -> Document {
        self.compositor
            .displayed()
            .cloned()
            .unwrap_or_else(|| self.compositor.compose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::MemorySink;

    fn session() -> EditorSession<MemorySink> {
        EditorSession::new(MemorySink::new(), Duration::ZERO)
    }

    #[test]
    fn edits_land_in_the_active_buffer() {
        let t0 = Instant::now();
        let mut s = session();
        s.select_tab(SourceKind::Style);
        s.edit_active("body{}", t0);
        assert_eq!(s.snapshot().style, "body{}");
        assert!(s.snapshot().markup.is_empty());
        assert_eq!(s.active_text(), "body{}");
    }

    #[test]
    fn loading_a_project_replaces_all_buffers_and_resets_layout() {
        let t0 = Instant::now();
        let mut s = session();
        s.select_tab(SourceKind::Script);
        s.toggle_view_mode(t0);
        s.edit_active("stale", t0);

        s.load_project(
            Project {
                id: "p1".into(),
                name: "Demo".into(),
                sources: SourceSet::new("<i>x</i>", "", ""),
            },
            t0,
        );

        assert_eq!(s.project_id(), Some("p1"));
        assert_eq!(s.active_tab(), SourceKind::Markup);
        assert_eq!(s.view_mode(), ViewMode::Split);
        assert_eq!(s.snapshot(), SourceSet::new("<i>x</i>", "", ""));
        assert_eq!(s.poll(t0), Some(RenderOutcome::Rendered));
        assert_eq!(s.compositor().sink().loads(), 1);
    }

    #[test]
    fn close_tears_the_sink_down() {
        let t0 = Instant::now();
        let mut s = session();
        s.edit_active("<p>x</p>", t0);
        s.poll(t0);
        s.close();
        assert!(!s.is_open());
        assert!(s.compositor().sink().content().is_none());
        assert!(s.compositor().pending().is_none());
    }
}
