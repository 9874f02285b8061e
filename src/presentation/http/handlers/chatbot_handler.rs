use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::BytesRejection,
    },
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    AskChatbotUseCase, BuildChatbotUseCase, GetChatbotStatusUseCase,
    ask_chatbot::AskChatbotRequest, build_chatbot::BuildChatbotRequest,
    get_chatbot_status::GetChatbotStatusRequest,
};
use crate::presentation::http::dto::{
    AskRequestDto, AskResponseDto, BuildChatbotResponseDto, StatusResponseDto,
};
use crate::presentation::http::errors::{ApiError, NO_FILE_FOUND};

const FILE_FIELD: &str = "file";

pub struct ChatbotHandler {
    build_chatbot_use_case: Arc<BuildChatbotUseCase>,
    ask_chatbot_use_case: Arc<AskChatbotUseCase>,
    get_chatbot_status_use_case: Arc<GetChatbotStatusUseCase>,
}

impl ChatbotHandler {
    pub fn new(
        build_chatbot_use_case: Arc<BuildChatbotUseCase>,
        ask_chatbot_use_case: Arc<AskChatbotUseCase>,
        get_chatbot_status_use_case: Arc<GetChatbotStatusUseCase>,
    ) -> Self {
        Self {
            build_chatbot_use_case,
            ask_chatbot_use_case,
            get_chatbot_status_use_case,
        }
    }

    pub async fn build_chatbot(
        State(handler): State<Arc<ChatbotHandler>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<impl IntoResponse, ApiError> {
        let mut multipart = multipart.map_err(|e| {
            tracing::warn!("Rejected upload: {}", e);
            ApiError::from_body_status(e.status(), NO_FILE_FOUND)
        })?;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            ApiError::from_body_status(e.status(), format!("Invalid multipart body: {}", e))
        })? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let file_name = field.file_name().unwrap_or_default().to_string();
            let file_data = field
                .bytes()
                .await
                .map_err(|e| {
                    ApiError::from_body_status(e.status(), format!("Failed to read upload: {}", e))
                })?
                .to_vec();

            let request = BuildChatbotRequest {
                file_name,
                file_data,
            };

            let response = handler.build_chatbot_use_case.execute(request).await?;
            return Ok((
                StatusCode::CREATED,
                Json(BuildChatbotResponseDto::from(response)),
            ));
        }

        Err(ApiError::BadRequest(NO_FILE_FOUND.to_string()))
    }

    pub async fn ask_chatbot(
        State(handler): State<Arc<ChatbotHandler>>,
        Path(chatbot_id): Path<String>,
        body: Result<Bytes, BytesRejection>,
    ) -> Result<impl IntoResponse, ApiError> {
        let body = body.map_err(|e| ApiError::from_body_status(e.status(), e.body_text()))?;
        // A body that is not JSON is treated like one without a question.
        let dto: AskRequestDto = serde_json::from_slice(&body).unwrap_or_default();

        let request = AskChatbotRequest {
            chatbot_id: chatbot_id.clone(),
            question: dto.question,
        };

        let response = handler.ask_chatbot_use_case.execute(request).await?;
        if response.degraded_retrieval {
            tracing::warn!(
                "Chatbot {} answered from a degraded retrieval ({} passages)",
                chatbot_id,
                response.passages_used
            );
        } else {
            tracing::info!(
                "Chatbot {} answered from {} passages",
                chatbot_id,
                response.passages_used
            );
        }
        Ok((StatusCode::OK, Json(AskResponseDto::from(response))))
    }

    pub async fn chatbot_status(
        State(handler): State<Arc<ChatbotHandler>>,
        Path(chatbot_id): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        let request = GetChatbotStatusRequest { chatbot_id };

        let response = handler.get_chatbot_status_use_case.execute(request).await?;
        Ok((StatusCode::OK, Json(StatusResponseDto::from(response))))
    }
}
