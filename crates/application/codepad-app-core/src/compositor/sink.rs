use codepad_core::Document;
use codepad_infra::{PreviewError, PreviewFile};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("rendering sink unavailable: {0}")]
    Unavailable(String),
    #[error("rendering sink IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PreviewError> for SinkError {
    fn from(value: PreviewError) -> Self {
        match value {
            PreviewError::Io(e) => SinkError::Io(e),
            other => SinkError::Unavailable(other.to_string()),
        }
    }
}

/// Isolated surface that displays a composed document.
///
/// `load` replaces whatever the sink showed before; it never patches.
pub trait RenderSink {
    fn load(&mut self, document: &Document) -> Result<(), SinkError>;
    fn teardown(&mut self);
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn load(&mut self, document: &Document) -> Result<(), SinkError> {
        (**self).load(document)
    }

    fn teardown(&mut self) {
        (**self).teardown()
    }
}

/// Sink that only remembers what it was given. Never executes anything.
#[derive(Debug, Clone)]
pub struct MemorySink {
    content: Option<Document>,
    loads: usize,
    available: bool,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            content: None,
            loads: 0,
            available: true,
        }
    }

    pub fn content(&self) -> Option<&Document> {
        self.content.as_ref()
    }

    /// Successful loads so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Simulate the surface going away (or coming back).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl RenderSink for MemorySink {
    fn load(&mut self, document: &Document) -> Result<(), SinkError> {
        if !self.available {
            return Err(SinkError::Unavailable("memory sink detached".into()));
        }
        self.content = Some(document.clone());
        self.loads += 1;
        Ok(())
    }

    fn teardown(&mut self) {
        self.content = None;
    }
}

/// Writes each document to the live preview directory a browser tab watches.
#[derive(Debug, Clone)]
pub struct FilePreviewSink {
    file: PreviewFile,
}

impl FilePreviewSink {
    pub fn new(file: PreviewFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &PreviewFile {
        &self.file
    }
}

impl RenderSink for FilePreviewSink {
    fn load(&mut self, document: &Document) -> Result<(), SinkError> {
        self.file.write(document.export_bytes())?;
        Ok(())
    }

    fn teardown(&mut self) {
        if let Err(e) = self.file.remove() {
            tracing::warn!("failed to remove preview directory {}: {e}", self.file.dir());
        }
    }
}
