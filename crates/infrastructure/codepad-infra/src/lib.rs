pub mod net;
pub mod preview;

// Re-exports for convenience
pub use net::{default_http_client, GatewayClient, GatewayError};
pub use preview::{open_url, PreviewError, PreviewFile};
