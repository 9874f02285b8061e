pub mod chatbot_dto;
pub mod response_dto;

pub use chatbot_dto::*;
pub use response_dto::*;
