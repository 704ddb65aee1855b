use anyhow::Context;
use codepad_persistence::{ClientState, FileClientStore};

use crate::ports::ClientStore;

/// [`ClientStore`] backed by a JSON file in the platform config directory.
pub struct PlatformClientStore {
    inner: FileClientStore,
}

impl PlatformClientStore {
    pub fn new() -> anyhow::Result<Self> {
        let inner = FileClientStore::platform().context("Could not locate client state")?;
        Ok(Self { inner })
    }

    pub fn with_store(inner: FileClientStore) -> Self {
        Self { inner }
    }
}

impl ClientStore for PlatformClientStore {
    fn load(&self) -> anyhow::Result<ClientState> {
        self.inner
            .load()
            .with_context(|| format!("Failed to read {}", self.inner.path()))
    }

    fn save(&self, state: &ClientState) -> anyhow::Result<()> {
        self.inner
            .save(state)
            .with_context(|| format!("Failed to write {}", self.inner.path()))
    }
}
