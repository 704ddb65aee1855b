mod atomic;
mod client_state;
mod error;
mod maintenance;

pub use atomic::atomic_write;
pub use client_state::{ClientState, FileClientStore};
pub use error::*;
