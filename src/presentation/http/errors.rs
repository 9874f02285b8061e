use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::use_cases::{
    ask_chatbot::AskChatbotError, build_chatbot::BuildChatbotError,
    get_chatbot_status::GetChatbotStatusError,
};
use crate::presentation::http::dto::ErrorResponseDto;

pub const NO_FILE_FOUND: &str = "No file found";
pub const CHATBOT_NOT_FOUND: &str = "Chatbot not found";
pub const PAYLOAD_TOO_LARGE: &str = "Request body too large";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a body-reading failure: the size limit keeps its 413, anything
    /// else becomes a 400 carrying `message`.
    pub fn from_body_status(status: StatusCode, message: impl Into<String>) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(PAYLOAD_TOO_LARGE.into())
        } else {
            ApiError::BadRequest(message.into())
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorResponseDto { error })).into_response()
    }
}

impl From<BuildChatbotError> for ApiError {
    fn from(error: BuildChatbotError) -> Self {
        match error {
            BuildChatbotError::ValidationError(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(format!("Failed to build chatbot: {}", other)),
        }
    }
}

impl From<AskChatbotError> for ApiError {
    fn from(error: AskChatbotError) -> Self {
        match error {
            AskChatbotError::ChatbotNotFound(_) => ApiError::NotFound(CHATBOT_NOT_FOUND.into()),
            AskChatbotError::ValidationError(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(format!("Failed to ask chatbot: {}", other)),
        }
    }
}

impl From<GetChatbotStatusError> for ApiError {
    fn from(error: GetChatbotStatusError) -> Self {
        match error {
            GetChatbotStatusError::ChatbotNotFound(_) => {
                ApiError::NotFound(CHATBOT_NOT_FOUND.into())
            }
            other => ApiError::Internal(format!("Failed to get chatbot status: {}", other)),
        }
    }
}
