use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::language_model::{LanguageModel, LanguageModelError};
use crate::domain::entities::DocumentUnit;

const SYSTEM_PROMPT: &str = "You answer questions about a PDF document. \
Use only the passages provided. If they do not contain the answer, say so.";

#[derive(Debug, Clone)]
pub struct LanguageModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Renders retrieved passages, each tagged with its page, followed by the question.
pub fn build_prompt(question: &str, context: &[DocumentUnit]) -> String {
    let mut prompt = String::from("Passages:\n");

    for unit in context {
        let page = unit.page_number().unwrap_or("?");
        prompt.push_str(&format!("[page {}] {}\n", page, unit.content().trim()));
    }

    prompt.push_str(&format!("\nQuestion: {}", question.trim()));
    prompt
}

/// The first choice's content, verbatim.
fn parse_answer(body: &str) -> Result<String, LanguageModelError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LanguageModelError::ApiError(format!("failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LanguageModelError::EmptyAnswer)
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionLanguageModel {
    client: Client,
    config: LanguageModelConfig,
}

impl ChatCompletionLanguageModel {
    pub fn new(config: LanguageModelConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionLanguageModel {
    async fn answer(
        &self,
        question: &str,
        context: &[DocumentUnit],
    ) -> Result<String, LanguageModelError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(question, context),
                },
            ],
        };

        tracing::debug!(
            "Sending {} passages to {} ({})",
            context.len(),
            self.config.model,
            self.endpoint()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LanguageModelError::Timeout(self.config.timeout_secs)
                } else {
                    LanguageModelError::NetworkError(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LanguageModelError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!("Language model returned {}: {}", status, detail);
            return Err(LanguageModelError::ApiError(format!(
                "{} returned {}: {}",
                self.config.model, status, detail
            )));
        }

        parse_answer(&body)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
