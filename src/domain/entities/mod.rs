pub mod chatbot;
pub mod document_unit;

pub use chatbot::Chatbot;
pub use document_unit::DocumentUnit;
