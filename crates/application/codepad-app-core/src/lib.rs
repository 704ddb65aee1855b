pub mod app_core;
pub mod auth;
pub mod compositor;
pub mod domain;
pub mod editor;
pub mod gateway;
pub mod kernel;
pub mod persistence;
pub mod ports;
pub mod viewmodel;

pub use app_core::*;
pub use auth::{guard, AuthContext, AuthState, Navigation, Route};
pub use compositor::{
    Compositor, Debouncer, FilePreviewSink, MemorySink, PendingRender, RenderOutcome, RenderSink,
    SinkError,
};
pub use domain::{AppState, BootState, EditorMeta, Notification, NotificationLevel};
pub use editor::EditorSession;
pub use gateway::HttpProjectGateway;
pub use kernel::AppKernel;
pub use persistence::PlatformClientStore;
pub use ports::*;
pub use viewmodel::*;
