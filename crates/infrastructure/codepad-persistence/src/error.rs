#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not determine the platform config directory")]
    NoConfigDir,
    #[error("client state file is corrupt: {0}")]
    Corrupt(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Missing,
    Corrupt,
    InvalidPath,
    Io,
    Codec,
}

impl StorageError {
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::NoConfigDir => StorageErrorKind::Missing,
            StorageError::Corrupt(_) => StorageErrorKind::Corrupt,
            StorageError::Io(_) => StorageErrorKind::Io,
            StorageError::Serde(_) => StorageErrorKind::Codec,
            StorageError::InvalidPath(_) => StorageErrorKind::InvalidPath,
        }
    }
}
