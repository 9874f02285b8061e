use async_trait::async_trait;

use crate::domain::entities::DocumentUnit;

#[derive(Debug)]
pub enum LanguageModelError {
    NetworkError(String),
    ApiError(String),
    EmptyAnswer,
    Timeout(u64),
}

impl std::fmt::Display for LanguageModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageModelError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            LanguageModelError::ApiError(msg) => write!(f, "API error: {}", msg),
            LanguageModelError::EmptyAnswer => write!(f, "Language model returned no answer"),
            LanguageModelError::Timeout(secs) => {
                write!(f, "Language model did not answer within {}s", secs)
            }
        }
    }
}

impl std::error::Error for LanguageModelError {}

/// Answers a question grounded on retrieved passages.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn answer(
        &self,
        question: &str,
        context: &[DocumentUnit],
    ) -> Result<String, LanguageModelError>;

    fn model_name(&self) -> &str;
}
