use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug)]
pub enum FileStorageError {
    FileNotFound(String),
    PermissionDenied(String),
    IoError(String),
    InvalidPath(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::FileNotFound(path) => write!(f, "File not found: {}", path),
            FileStorageError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
            FileStorageError::InvalidPath(path) => write!(f, "Invalid path: {}", path),
        }
    }
}

impl std::error::Error for FileStorageError {}

impl From<std::io::Error> for FileStorageError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => FileStorageError::FileNotFound(error.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                FileStorageError::PermissionDenied(error.to_string())
            }
            _ => FileStorageError::IoError(error.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Upload storage addressed by chatbot id, so equal file names never collide.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store_file(
        &self,
        chatbot_id: Uuid,
        file_name: &str,
        data: &[u8],
    ) -> Result<StoredFile, FileStorageError>;

    /// Removes everything stored for `chatbot_id`. Returns `false` if nothing was there.
    async fn delete_files(&self, chatbot_id: Uuid) -> Result<bool, FileStorageError>;
}
