use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatbotHandler;

pub fn chatbot_routes(chatbot_handler: Arc<ChatbotHandler>) -> Router {
    Router::new()
        .route("/build_chatbot", post(ChatbotHandler::build_chatbot))
        .route("/ask_chatbot/{chatbot_id}", post(ChatbotHandler::ask_chatbot))
        .route(
            "/chatbot_status/{chatbot_id}",
            get(ChatbotHandler::chatbot_status),
        )
        .with_state(chatbot_handler)
}
