pub mod document;
pub mod project;
pub mod source;

pub use document::{compose, Document, SCRIPT_CLOSE, SCRIPT_OPEN, STYLE_CLOSE, STYLE_OPEN};
pub use project::{Project, ProjectId, ProjectSummary};
pub use source::{SourceKind, SourceSet, ViewMode};
