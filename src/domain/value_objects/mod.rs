pub mod chatbot_status;
pub mod unit_metadata;

pub use chatbot_status::ChatbotStatus;
pub use unit_metadata::UnitMetadata;
