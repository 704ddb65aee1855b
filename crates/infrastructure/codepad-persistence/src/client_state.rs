use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::atomic::atomic_write;
use crate::maintenance::quarantine_corrupt_file;
use crate::StorageError;

const QUALIFIER: &str = "com";
const ORG: &str = "codepad";
const APP: &str = "codepad";
const FILE_NAME: &str = "client.json";

/// State that survives process restarts: the bearer token and the theme flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub light_mode: bool,
}

impl ClientState {
    /// The stored token, treating an empty string as absent.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// JSON-file backed [`ClientState`] storage.
#[derive(Debug, Clone)]
pub struct FileClientStore {
    path: Utf8PathBuf,
}

impl FileClientStore {
    /// Store under the platform config directory.
    pub fn platform() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(StorageError::NoConfigDir)?;
        let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf())
            .map_err(|p| StorageError::InvalidPath(p.to_string_lossy().into_owned()))?;
        Ok(Self::in_dir(&dir))
    }

    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            path: dir.join(FILE_NAME),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the stored state. A missing file yields the default state; an
    /// unreadable one is quarantined and also yields the default.
    pub fn load(&self) -> Result<ClientState, StorageError> {
        if !self.path.exists() {
            return Ok(ClientState::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<ClientState>(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!("failed to parse {}: {e}", self.path);
                quarantine_corrupt_file(&self.path)?;
                Ok(ClientState::default())
            }
        }
    }

    pub fn save(&self, state: &ClientState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        atomic_write(self.path.as_std_path(), json.as_bytes())?;
        tracing::debug!("client state written to {}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_absent() {
        let state = ClientState {
            token: Some(String::new()),
            light_mode: false,
        };
        assert_eq!(state.token(), None);
    }
}
