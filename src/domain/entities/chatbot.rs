use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ChatbotStatus;

/// Status record for one chatbot. Its retrieval collection shares the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chatbot {
    id: Uuid,
    status: ChatbotStatus,
    source_file_name: Option<String>,
    page_count: Option<usize>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Chatbot {
    pub fn new(id: Uuid, source_file_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: ChatbotStatus::CreatingEmbeddings,
            source_file_name,
            page_count: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn collection_name(&self) -> String {
        self.id.to_string()
    }

    pub fn status(&self) -> ChatbotStatus {
        self.status
    }

    pub fn source_file_name(&self) -> Option<&str> {
        self.source_file_name.as_deref()
    }

    pub fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Overwrites the status unconditionally.
    pub fn set_status(&mut self, status: ChatbotStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn mark_ready(&mut self, page_count: usize) -> Result<(), String> {
        if !self.status.can_transition_to(&ChatbotStatus::Ready) {
            return Err(format!("Chatbot is not being built: {}", self.status));
        }

        self.page_count = Some(page_count);
        self.error_message = None;
        self.set_status(ChatbotStatus::Ready);
        Ok(())
    }

    pub fn mark_failed(&mut self, error: String) -> Result<(), String> {
        if !self.status.can_transition_to(&ChatbotStatus::Error) {
            return Err(format!("Chatbot is not being built: {}", self.status));
        }

        self.error_message = Some(error);
        self.set_status(ChatbotStatus::Error);
        Ok(())
    }

    pub fn build_duration(&self) -> Option<chrono::Duration> {
        if self.status.is_terminal() {
            Some(self.updated_at - self.created_at)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chatbot_creation() {
        let id = Uuid::new_v4();
        let chatbot = Chatbot::new(id, Some("manual.pdf".to_string()));

        assert_eq!(chatbot.id(), id);
        assert_eq!(chatbot.collection_name(), id.to_string());
        assert_eq!(chatbot.status(), ChatbotStatus::CreatingEmbeddings);
        assert_eq!(chatbot.source_file_name(), Some("manual.pdf"));
        assert!(chatbot.build_duration().is_none());
    }

    #[test]
    fn test_successful_build() {
        let mut chatbot = Chatbot::new(Uuid::new_v4(), None);

        assert!(chatbot.mark_ready(12).is_ok());
        assert_eq!(chatbot.status(), ChatbotStatus::Ready);
        assert_eq!(chatbot.page_count(), Some(12));
        assert!(chatbot.build_duration().unwrap() >= chrono::Duration::zero());

        // ready is terminal
        assert!(chatbot.mark_failed("late failure".to_string()).is_err());
        assert_eq!(chatbot.status(), ChatbotStatus::Ready);
    }

    #[test]
    fn test_failed_build() {
        let mut chatbot = Chatbot::new(Uuid::new_v4(), None);

        assert!(chatbot.mark_failed("not a pdf".to_string()).is_ok());
        assert_eq!(chatbot.status(), ChatbotStatus::Error);
        assert_eq!(chatbot.error_message(), Some("not a pdf"));
        assert!(chatbot.mark_ready(1).is_err());
    }
}
