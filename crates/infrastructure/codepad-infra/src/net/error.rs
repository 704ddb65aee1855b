/// Failure of a call to the project store.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("authorization denied (HTTP {0})")]
    AuthDenied(u16),
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid store url {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}

impl GatewayError {
    /// True for 401/403 responses, which invalidate the current token.
    pub fn is_auth_denied(&self) -> bool {
        matches!(self, GatewayError::AuthDenied(_))
    }
}
