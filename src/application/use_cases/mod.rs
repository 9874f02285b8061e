pub mod ask_chatbot;
pub mod build_chatbot;
pub mod get_chatbot_status;

pub use ask_chatbot::AskChatbotUseCase;
pub use build_chatbot::BuildChatbotUseCase;
pub use get_chatbot_status::GetChatbotStatusUseCase;
