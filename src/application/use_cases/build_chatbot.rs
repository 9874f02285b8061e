use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::FileStorage;
use crate::application::services::{IndexBuilderService, index_builder::IndexBuildError};
use crate::domain::entities::Chatbot;
use crate::domain::repositories::{ChatbotRegistry, chatbot_registry::RegistryError};

#[derive(Debug)]
pub enum BuildChatbotError {
    ValidationError(String),
    StorageError(String),
    RegistryError(String),
    ParseError(String),
    IndexingError(String),
}

impl std::fmt::Display for BuildChatbotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildChatbotError::ValidationError(msg) => write!(f, "{}", msg),
            BuildChatbotError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            BuildChatbotError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
            BuildChatbotError::ParseError(msg) => write!(f, "Could not read document: {}", msg),
            BuildChatbotError::IndexingError(msg) => write!(f, "Indexing error: {}", msg),
        }
    }
}

impl std::error::Error for BuildChatbotError {}

impl From<RegistryError> for BuildChatbotError {
    fn from(error: RegistryError) -> Self {
        BuildChatbotError::RegistryError(error.to_string())
    }
}

impl From<IndexBuildError> for BuildChatbotError {
    fn from(error: IndexBuildError) -> Self {
        match error {
            IndexBuildError::ParseError(msg) => BuildChatbotError::ParseError(msg),
            _ => BuildChatbotError::IndexingError(error.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildChatbotRequest {
    pub file_name: String,
    pub file_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct BuildChatbotResponse {
    pub chatbot_id: Uuid,
}

/// Upload -> register -> index. Failures after registration leave the record in `error`.
pub struct BuildChatbotUseCase {
    registry: Arc<dyn ChatbotRegistry>,
    file_storage: Arc<dyn FileStorage>,
    index_builder: Arc<IndexBuilderService>,
}

impl BuildChatbotUseCase {
    pub fn new(
        registry: Arc<dyn ChatbotRegistry>,
        file_storage: Arc<dyn FileStorage>,
        index_builder: Arc<IndexBuilderService>,
    ) -> Self {
        Self {
            registry,
            file_storage,
            index_builder,
        }
    }

    pub async fn execute(
        &self,
        request: BuildChatbotRequest,
    ) -> Result<BuildChatbotResponse, BuildChatbotError> {
        if request.file_name.trim().is_empty() {
            return Err(BuildChatbotError::ValidationError(
                "No file found".to_string(),
            ));
        }

        if request.file_data.is_empty() {
            return Err(BuildChatbotError::ValidationError(
                "Uploaded file is empty".to_string(),
            ));
        }

        let chatbot = Chatbot::new(Uuid::new_v4(), Some(request.file_name.clone()));
        let chatbot_id = chatbot.id();
        let collection_name = chatbot.collection_name();
        self.registry.register(chatbot).await?;

        match self
            .index_document(chatbot_id, &collection_name, &request)
            .await
        {
            Ok(page_count) => {
                self.registry.record_success(chatbot_id, page_count).await?;
                tracing::info!(
                    "Chatbot {} created from {} ({} pages, {} chatbots registered)",
                    chatbot_id,
                    request.file_name,
                    page_count,
                    self.registry.count().await?
                );

                Ok(BuildChatbotResponse { chatbot_id })
            }
            Err(e) => {
                tracing::error!("Error building chatbot {}: {}", chatbot_id, e);

                if let Err(registry_error) =
                    self.registry.record_failure(chatbot_id, e.to_string()).await
                {
                    tracing::error!(
                        "Failed to record failure for chatbot {}: {}",
                        chatbot_id,
                        registry_error
                    );
                }

                if let Err(storage_error) = self.file_storage.delete_files(chatbot_id).await {
                    tracing::error!(
                        "Failed to clean up upload for chatbot {}: {}",
                        chatbot_id,
                        storage_error
                    );
                }

                Err(e)
            }
        }
    }

    async fn index_document(
        &self,
        chatbot_id: Uuid,
        collection_name: &str,
        request: &BuildChatbotRequest,
    ) -> Result<usize, BuildChatbotError> {
        let stored_file = self
            .file_storage
            .store_file(chatbot_id, &request.file_name, &request.file_data)
            .await
            .map_err(|e| BuildChatbotError::StorageError(e.to_string()))?;

        tracing::info!(
            "Saved file: {} ({} bytes)",
            stored_file.path.display(),
            stored_file.size
        );

        let page_count = self
            .index_builder
            .build_index(collection_name, &stored_file.path)
            .await?;

        Ok(page_count)
    }
}
