use serde::{Deserialize, Serialize};

/// Lifecycle of a chatbot's retrieval index.
///
/// `CreatingEmbeddings` is the only non-terminal state; a build either ends in
/// `Ready` or in `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatbotStatus {
    CreatingEmbeddings,
    Ready,
    Error,
}

impl ChatbotStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ChatbotStatus::Ready)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ChatbotStatus::Ready | ChatbotStatus::Error)
    }

    pub fn can_transition_to(&self, new_status: &ChatbotStatus) -> bool {
        matches!(
            (self, new_status),
            (ChatbotStatus::CreatingEmbeddings, ChatbotStatus::Ready)
                | (ChatbotStatus::CreatingEmbeddings, ChatbotStatus::Error)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatbotStatus::CreatingEmbeddings => "creating_embeddings",
            ChatbotStatus::Ready => "ready",
            ChatbotStatus::Error => "error",
        }
    }
}

impl Default for ChatbotStatus {
    fn default() -> Self {
        ChatbotStatus::CreatingEmbeddings
    }
}

impl std::fmt::Display for ChatbotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_checks() {
        assert!(ChatbotStatus::Ready.is_ready());
        assert!(!ChatbotStatus::CreatingEmbeddings.is_ready());
        assert!(!ChatbotStatus::Error.is_ready());

        assert!(!ChatbotStatus::CreatingEmbeddings.is_terminal());
        assert!(ChatbotStatus::Ready.is_terminal());
        assert!(ChatbotStatus::Error.is_terminal());
    }

    #[test]
    fn test_transitions() {
        let creating = ChatbotStatus::CreatingEmbeddings;

        assert!(creating.can_transition_to(&ChatbotStatus::Ready));
        assert!(creating.can_transition_to(&ChatbotStatus::Error));

        assert!(!ChatbotStatus::Ready.can_transition_to(&ChatbotStatus::Error));
        assert!(!ChatbotStatus::Ready.can_transition_to(&ChatbotStatus::CreatingEmbeddings));
        assert!(!ChatbotStatus::Error.can_transition_to(&ChatbotStatus::Ready));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_value(ChatbotStatus::CreatingEmbeddings).unwrap(),
            serde_json::json!("creating_embeddings")
        );
        assert_eq!(ChatbotStatus::Ready.to_string(), "ready");
        assert_eq!(ChatbotStatus::Error.as_str(), "error");
        assert_eq!(ChatbotStatus::default(), ChatbotStatus::CreatingEmbeddings);
    }
}
