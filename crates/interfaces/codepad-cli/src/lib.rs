pub mod commands;
pub mod session;

pub use session::Session;

/// File names a project is laid out as on disk by `pull` and read back by `push`.
pub const MARKUP_FILE: &str = "index.html";
pub const STYLE_FILE: &str = "style.css";
pub const SCRIPT_FILE: &str = "script.js";
