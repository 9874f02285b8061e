use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::value_objects::ChatbotStatus;

#[derive(Debug)]
pub enum RegistryError {
    UnknownChatbot(Uuid),
    AlreadyRegistered(Uuid),
    InvalidTransition(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::UnknownChatbot(id) => write!(f, "Unknown chatbot: {}", id),
            RegistryError::AlreadyRegistered(id) => write!(f, "Chatbot already registered: {}", id),
            RegistryError::InvalidTransition(msg) => write!(f, "Invalid transition: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Chatbot id -> status bookkeeping. Records are never removed.
#[async_trait]
pub trait ChatbotRegistry: Send + Sync {
    /// Insert a new record in `creating_embeddings`.
    async fn register(&self, chatbot: Chatbot) -> Result<(), RegistryError>;

    /// Overwrites the status regardless of the current one.
    async fn set_status(&self, id: Uuid, status: ChatbotStatus) -> Result<(), RegistryError>;

    async fn get_status(&self, id: Uuid) -> Result<ChatbotStatus, RegistryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chatbot>, RegistryError>;

    async fn record_success(&self, id: Uuid, page_count: usize) -> Result<(), RegistryError>;

    async fn record_failure(&self, id: Uuid, message: String) -> Result<(), RegistryError>;

    async fn count(&self) -> Result<usize, RegistryError>;
}
