//! Live preview: buffers in, one isolated rendered document out.
//!
//! Edits only arm the [`Debouncer`]; the sink is written when the pending
//! render fires in [`Compositor::poll`]. What the sink shows is therefore
//! always the composition of the buffers as they were at fire time.

mod debounce;
mod sink;

pub use debounce::{Debouncer, PendingRender};
pub use sink::{FilePreviewSink, MemorySink, RenderSink, SinkError};

use std::time::{Duration, Instant};

use codepad_core::{compose, Document, SourceKind, SourceSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// The sink is hidden; nothing was written.
    Hidden,
    /// The sink refused the document. Retried on the next trigger.
    SinkUnavailable,
}

pub struct Compositor<S: RenderSink> {
    sources: SourceSet,
    debouncer: Debouncer,
    sink: S,
    visible: bool,
    displayed: Option<Document>,
    renders: u64,
}

impl<S: RenderSink> Compositor<S> {
    pub fn new(sink: S, quiet: Duration) -> Self {
        Self {
            sources: SourceSet::default(),
            debouncer: Debouncer::new(quiet),
            sink,
            visible: true,
            displayed: None,
            renders: 0,
        }
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Replace one buffer and (re)arm the render.
    pub fn set_buffer(&mut self, which: SourceKind, text: impl Into<String>, now: Instant) {
        self.sources.set(which, text);
        let task = self.debouncer.arm(now);
        debug!(?which, generation = task.generation, "render armed");
    }

    /// Replace all three buffers at once, arming a single render.
    pub fn replace_sources(&mut self, sources: SourceSet, now: Instant) {
        self.sources = sources;
        self.debouncer.arm(now);
    }

    pub fn compose(&self) -> Document {
        compose(&self.sources)
    }

    /// Push the current composition to the sink, replacing its content.
    pub fn render(&mut self) -> RenderOutcome {
        if !self.visible {
            debug!("render skipped: preview hidden");
            return RenderOutcome::Hidden;
        }

        let doc = self.compose();
        match self.sink.load(&doc) {
            Ok(()) => {
                self.renders += 1;
                debug!(bytes = doc.len(), renders = self.renders, "preview rendered");
                self.displayed = Some(doc);
                RenderOutcome::Rendered
            }
            Err(e) => {
                warn!("preview render deferred: {e}");
                RenderOutcome::SinkUnavailable
            }
        }
    }

    /// Fire the pending render if the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<RenderOutcome> {
        self.debouncer.poll(now).map(|_| self.render())
    }

    /// Show or hide the sink. Hiding tears it down; either way a render
    /// pass is armed so a re-shown sink gets repopulated.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if self.visible && !visible {
            self.sink.teardown();
            self.displayed = None;
        }
        self.visible = visible;
        self.debouncer.arm(now);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Drop buffers, pending render and sink content.
    pub fn reset(&mut self) {
        self.sources = SourceSet::default();
        self.debouncer.cancel();
        self.sink.teardown();
        self.displayed = None;
    }

    pub fn pending(&self) -> Option<PendingRender> {
        self.debouncer.pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.pending().map(|p| p.deadline)
    }

    /// The document the sink currently holds, if any.
    pub fn displayed(&self) -> Option<&Document> {
        self.displayed.as_ref()
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compositor() -> (Compositor<MemorySink>, Instant) {
        (
            Compositor::new(MemorySink::new(), Duration::from_millis(10)),
            Instant::now(),
        )
    }

    #[test]
    fn nothing_renders_before_the_quiet_period() {
        let (mut c, t0) = compositor();
        c.set_buffer(SourceKind::Markup, "<p>x</p>", t0);
        assert_eq!(c.poll(t0 + Duration::from_millis(5)), None);
        assert!(c.sink().content().is_none());
        assert_eq!(
            c.poll(t0 + Duration::from_millis(10)),
            Some(RenderOutcome::Rendered)
        );
    }

    #[test]
    fn last_edit_per_buffer_wins_within_a_burst() {
        let (mut c, t0) = compositor();
        c.set_buffer(SourceKind::Markup, "<p>a</p>", t0);
        c.set_buffer(SourceKind::Style, "p{}", t0 + Duration::from_millis(3));
        c.set_buffer(SourceKind::Markup, "<p>b</p>", t0 + Duration::from_millis(6));

        let t_end = t0 + Duration::from_millis(16);
        assert_eq!(c.poll(t_end), Some(RenderOutcome::Rendered));
        assert_eq!(c.sink().loads(), 1);
        assert_eq!(
            c.sink().content().map(Document::as_str),
            Some("<p>b</p><style>p{}</style><script></script>")
        );
    }

    #[test]
    fn unavailable_sink_is_retried_on_next_trigger() {
        let (mut c, t0) = compositor();
        c.sink_mut().set_available(false);
        c.set_buffer(SourceKind::Script, "1", t0);
        assert_eq!(
            c.poll(t0 + Duration::from_millis(10)),
            Some(RenderOutcome::SinkUnavailable)
        );
        assert!(c.displayed().is_none());

        c.sink_mut().set_available(true);
        c.set_buffer(SourceKind::Script, "2", t0 + Duration::from_millis(20));
        assert_eq!(
            c.poll(t0 + Duration::from_millis(30)),
            Some(RenderOutcome::Rendered)
        );
        assert_eq!(
            c.displayed().map(Document::as_str),
            Some("<style></style><script>2</script>")
        );
    }

    #[test]
    fn reset_clears_everything() {
        let (mut c, t0) = compositor();
        c.set_buffer(SourceKind::Markup, "x", t0);
        c.render();
        c.set_buffer(SourceKind::Markup, "y", t0);
        c.reset();
        assert_eq!(c.sources(), &SourceSet::default());
        assert!(c.pending().is_none());
        assert!(c.sink().content().is_none());
        assert!(c.displayed().is_none());
    }
}
