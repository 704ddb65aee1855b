//! Composition of a [`SourceSet`] into a single renderable document.

use crate::source::SourceSet;

pub const STYLE_OPEN: &str = "<style>";
pub const STYLE_CLOSE: &str = "</style>";
pub const SCRIPT_OPEN: &str = "<script>";
pub const SCRIPT_CLOSE: &str = "</script>";

/// A composed HTML document, ready to hand to a rendering sink or export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Document(String);

impl Document {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bytes of the standalone downloadable artifact.
    ///
    /// Identical to what a sink displays for this document.
    pub fn export_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Markup verbatim, then the wrapped style, then the wrapped script.
///
/// Markup comes first so both style and script can reference it, and the
/// style is applied before any script runs.
pub fn compose(sources: &SourceSet) -> Document {
    let mut out = String::with_capacity(
        sources.markup.len()
            + sources.style.len()
            + sources.script.len()
            + STYLE_OPEN.len()
            + STYLE_CLOSE.len()
            + SCRIPT_OPEN.len()
            + SCRIPT_CLOSE.len(),
    );
    out.push_str(&sources.markup);
    out.push_str(STYLE_OPEN);
    out.push_str(&sources.style);
    out.push_str(STYLE_CLOSE);
    out.push_str(SCRIPT_OPEN);
    out.push_str(&sources.script);
    out.push_str(SCRIPT_CLOSE);
    Document(out)
}
