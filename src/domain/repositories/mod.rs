pub mod chatbot_registry;

pub use chatbot_registry::ChatbotRegistry;
