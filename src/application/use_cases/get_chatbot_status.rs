use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::repositories::{ChatbotRegistry, chatbot_registry::RegistryError};

#[derive(Debug)]
pub enum GetChatbotStatusError {
    ChatbotNotFound(String),
    RegistryError(String),
}

impl std::fmt::Display for GetChatbotStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetChatbotStatusError::ChatbotNotFound(id) => write!(f, "Chatbot not found: {}", id),
            GetChatbotStatusError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
        }
    }
}

impl std::error::Error for GetChatbotStatusError {}

impl From<RegistryError> for GetChatbotStatusError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::UnknownChatbot(id) => {
                GetChatbotStatusError::ChatbotNotFound(id.to_string())
            }
            _ => GetChatbotStatusError::RegistryError(error.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetChatbotStatusRequest {
    pub chatbot_id: String,
}

#[derive(Debug, Clone)]
pub struct GetChatbotStatusResponse {
    pub chatbot: Chatbot,
}

pub struct GetChatbotStatusUseCase {
    registry: Arc<dyn ChatbotRegistry>,
}

impl GetChatbotStatusUseCase {
    pub fn new(registry: Arc<dyn ChatbotRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        request: GetChatbotStatusRequest,
    ) -> Result<GetChatbotStatusResponse, GetChatbotStatusError> {
        let chatbot_id = Uuid::parse_str(&request.chatbot_id)
            .map_err(|_| GetChatbotStatusError::ChatbotNotFound(request.chatbot_id.clone()))?;

        let chatbot = self
            .registry
            .find_by_id(chatbot_id)
            .await?
            .ok_or(GetChatbotStatusError::ChatbotNotFound(request.chatbot_id))?;

        match chatbot.error_message() {
            Some(error) => tracing::debug!(
                "Chatbot {} ({}) failed: {}",
                chatbot_id,
                chatbot.source_file_name().unwrap_or("unnamed upload"),
                error
            ),
            None => tracing::debug!(
                "Chatbot {} ({}) is {}, {} pages, built in {} ms",
                chatbot_id,
                chatbot.source_file_name().unwrap_or("unnamed upload"),
                chatbot.status(),
                chatbot.page_count().unwrap_or(0),
                chatbot
                    .build_duration()
                    .map(|duration| duration.num_milliseconds())
                    .unwrap_or(0)
            ),
        }

        Ok(GetChatbotStatusResponse { chatbot })
    }
}
