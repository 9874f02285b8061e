use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::LanguageModel;
use crate::application::services::{RetrieverService, retriever::RetrievalError};
use crate::domain::repositories::{ChatbotRegistry, chatbot_registry::RegistryError};
use crate::domain::value_objects::ChatbotStatus;

#[derive(Debug)]
pub enum AskChatbotError {
    ChatbotNotFound(String),
    ValidationError(String),
    NotReady(ChatbotStatus),
    RegistryError(String),
    RetrievalError(String),
    LanguageModelError(String),
}

impl std::fmt::Display for AskChatbotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AskChatbotError::ChatbotNotFound(id) => write!(f, "Chatbot not found: {}", id),
            AskChatbotError::ValidationError(msg) => write!(f, "{}", msg),
            AskChatbotError::NotReady(status) => {
                write!(f, "Chatbot is not ready (status: {})", status)
            }
            AskChatbotError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
            AskChatbotError::RetrievalError(msg) => write!(f, "Retrieval error: {}", msg),
            AskChatbotError::LanguageModelError(msg) => write!(f, "Language model error: {}", msg),
        }
    }
}

impl std::error::Error for AskChatbotError {}

impl From<RegistryError> for AskChatbotError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::UnknownChatbot(id) => AskChatbotError::ChatbotNotFound(id.to_string()),
            _ => AskChatbotError::RegistryError(error.to_string()),
        }
    }
}

impl From<RetrievalError> for AskChatbotError {
    fn from(error: RetrievalError) -> Self {
        AskChatbotError::RetrievalError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AskChatbotRequest {
    pub chatbot_id: String,
    pub question: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AskChatbotResponse {
    pub answer: String,
    pub passages_used: usize,
    pub degraded_retrieval: bool,
}

pub struct AskChatbotUseCase {
    registry: Arc<dyn ChatbotRegistry>,
    retriever: Arc<RetrieverService>,
    language_model: Arc<dyn LanguageModel>,
    call_timeout: Duration,
}

impl AskChatbotUseCase {
    pub fn new(
        registry: Arc<dyn ChatbotRegistry>,
        retriever: Arc<RetrieverService>,
        language_model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            registry,
            retriever,
            language_model,
            call_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub async fn execute(
        &self,
        request: AskChatbotRequest,
    ) -> Result<AskChatbotResponse, AskChatbotError> {
        // Unknown chatbots are reported before the body is looked at.
        let chatbot_id = Uuid::parse_str(&request.chatbot_id)
            .map_err(|_| AskChatbotError::ChatbotNotFound(request.chatbot_id.clone()))?;
        let status = self.registry.get_status(chatbot_id).await?;

        let question = request
            .question
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| {
                AskChatbotError::ValidationError(
                    "Missing \"question\" in the request body".to_string(),
                )
            })?;

        if !status.is_ready() {
            return Err(AskChatbotError::NotReady(status));
        }

        tracing::info!("Asking chatbot {}: {}", chatbot_id, question);

        let outcome = self
            .retriever
            .retrieve(&chatbot_id.to_string(), &question)
            .await?;
        let degraded_retrieval = outcome.is_degraded();
        let passages = outcome.into_units();

        let answer = tokio::time::timeout(
            self.call_timeout,
            self.language_model.answer(&question, &passages),
        )
        .await
        .map_err(|_| {
            AskChatbotError::LanguageModelError(format!(
                "no answer within {}s",
                self.call_timeout.as_secs()
            ))
        })?
        .map_err(|e| AskChatbotError::LanguageModelError(e.to_string()))?;

        Ok(AskChatbotResponse {
            answer,
            passages_used: passages.len(),
            degraded_retrieval,
        })
    }
}
