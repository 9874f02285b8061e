use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};

static UNSAFE_FILE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid file name pattern"));

/// Stores uploads as `<base_path>/<chatbot_id>/<sanitized file name>`.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn chatbot_dir(&self, chatbot_id: Uuid) -> PathBuf {
        self.base_path.join(chatbot_id.to_string())
    }

    /// Drops any directory components and replaces characters outside a
    /// conservative set, so client names can never escape the chatbot directory.
    pub fn sanitize_file_name(file_name: &str) -> Result<String, FileStorageError> {
        let base_name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();

        let sanitized = UNSAFE_FILE_NAME_CHARS
            .replace_all(base_name, "_")
            .trim_start_matches('.')
            .to_string();

        if sanitized.is_empty() {
            return Err(FileStorageError::InvalidPath(file_name.to_string()));
        }

        Ok(sanitized)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(
        &self,
        chatbot_id: Uuid,
        file_name: &str,
        data: &[u8],
    ) -> Result<StoredFile, FileStorageError> {
        let file_name = Self::sanitize_file_name(file_name)?;
        let directory = self.chatbot_dir(chatbot_id);
        fs::create_dir_all(&directory).await?;

        let file_path = directory.join(&file_name);
        if let Err(e) = fs::write(&file_path, data).await {
            let _ = fs::remove_dir_all(&directory).await;
            return Err(e.into());
        }

        Ok(StoredFile {
            path: file_path,
            size: data.len() as u64,
        })
    }

    async fn delete_files(&self, chatbot_id: Uuid) -> Result<bool, FileStorageError> {
        let directory = self.chatbot_dir(chatbot_id);

        if !fs::try_exists(&directory).await.unwrap_or(false) {
            return Ok(false);
        }

        fs::remove_dir_all(&directory).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            LocalFileStorage::sanitize_file_name("report.pdf").unwrap(),
            "report.pdf"
        );
        assert_eq!(
            LocalFileStorage::sanitize_file_name("../../etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(
            LocalFileStorage::sanitize_file_name("C:\\docs\\my report (v2).pdf").unwrap(),
            "my_report_v2_.pdf"
        );
        assert!(LocalFileStorage::sanitize_file_name("..").is_err());
        assert!(LocalFileStorage::sanitize_file_name("dir/").is_err());
    }

    #[tokio::test]
    async fn test_store_and_delete() {
        let temp = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(temp.path().join("uploads"));
        let chatbot_id = Uuid::new_v4();

        let stored = storage
            .store_file(chatbot_id, "doc.pdf", b"%PDF-1.5")
            .await
            .unwrap();

        assert_eq!(stored.size, 8);
        assert_eq!(
            stored.path,
            temp.path()
                .join("uploads")
                .join(chatbot_id.to_string())
                .join("doc.pdf")
        );
        assert!(stored.path.exists());

        assert!(storage.delete_files(chatbot_id).await.unwrap());
        assert!(!stored.path.exists());
        assert!(!storage.delete_files(chatbot_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_name_different_chatbots() {
        let temp = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(temp.path().to_path_buf());
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        storage.store_file(first, "a.pdf", b"first").await.unwrap();
        storage.store_file(second, "a.pdf", b"second").await.unwrap();

        let first_bytes = fs::read(temp.path().join(first.to_string()).join("a.pdf"))
            .await
            .unwrap();
        assert_eq!(first_bytes, b"first");
    }
}
