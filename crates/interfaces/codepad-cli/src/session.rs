use anyhow::Context;
use codepad_infra::{default_http_client, GatewayClient, GatewayError};
use codepad_persistence::FileClientStore;

/// Gateway client plus the token file shared with the desktop app.
pub struct Session {
    gateway: GatewayClient,
    store: FileClientStore,
}

impl Session {
    pub fn new(api: &str, store: FileClientStore) -> anyhow::Result<Self> {
        let client = default_http_client().context("Failed to build HTTP client")?;
        let gateway = GatewayClient::new(client, api)?;
        Ok(Self { gateway, store })
    }

    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }

    pub fn store(&self) -> &FileClientStore {
        &self.store
    }

    pub fn token(&self) -> anyhow::Result<String> {
        let state = self.store.load()?;
        match state.token() {
            Some(t) => Ok(t.to_owned()),
            None => anyhow::bail!("Not logged in (run `codepad-cli login` first)"),
        }
    }

    pub fn remember(&self, token: String) -> anyhow::Result<()> {
        let mut state = self.store.load()?;
        state.token = Some(token);
        self.store
            .save(&state)
            .with_context(|| format!("Failed to write {}", self.store.path()))
    }

    /// Drop the stored token. Returns whether one was present.
    pub fn forget(&self) -> anyhow::Result<bool> {
        let mut state = self.store.load()?;
        let had = state.token().is_some();
        state.token = None;
        self.store.save(&state)?;
        Ok(had)
    }

    /// Turn a gateway result into an `anyhow` one, signing out on denial.
    pub fn check<T>(&self, res: Result<T, GatewayError>) -> anyhow::Result<T> {
        match res {
            Ok(v) => Ok(v),
            Err(e) if e.is_auth_denied() => {
                tracing::warn!("authorization denied, clearing stored token");
                self.forget()?;
                anyhow::bail!("Session expired or revoked ({e}); log in again")
            }
            Err(e) => Err(e.into()),
        }
    }
}
