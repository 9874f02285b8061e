use serde::{Deserialize, Serialize};

use crate::application::use_cases::{
    ask_chatbot::AskChatbotResponse, build_chatbot::BuildChatbotResponse,
    get_chatbot_status::GetChatbotStatusResponse,
};

#[derive(Debug, Serialize)]
pub struct BuildChatbotResponseDto {
    pub chatbot_id: String,
}

impl From<BuildChatbotResponse> for BuildChatbotResponseDto {
    fn from(response: BuildChatbotResponse) -> Self {
        Self {
            chatbot_id: response.chatbot_id.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AskRequestDto {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponseDto {
    pub answer: String,
}

impl From<AskChatbotResponse> for AskResponseDto {
    fn from(response: AskChatbotResponse) -> Self {
        Self {
            answer: response.answer,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponseDto {
    pub status: String,
}

impl From<GetChatbotStatusResponse> for StatusResponseDto {
    fn from(response: GetChatbotStatusResponse) -> Self {
        Self {
            status: response.chatbot.status().as_str().to_string(),
        }
    }
}
