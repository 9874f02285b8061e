pub mod chatbot_routes;
pub mod health_routes;

pub use chatbot_routes::*;
pub use health_routes::*;
