use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::repositories::{ChatbotRegistry, chatbot_registry::RegistryError};
use crate::domain::value_objects::ChatbotStatus;

/// Process-lifetime registry behind one coarse lock. Locks are only held for
/// the duration of a single read or write, never across a build.
#[derive(Debug, Default)]
pub struct InMemoryChatbotRegistry {
    chatbots: RwLock<HashMap<Uuid, Chatbot>>,
}

impl InMemoryChatbotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn all(&self) -> Vec<Chatbot> {
        self.chatbots.read().await.values().cloned().collect()
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut Chatbot) -> Result<(), String> + Send,
    {
        let mut chatbots = self.chatbots.write().await;
        let chatbot = chatbots
            .get_mut(&id)
            .ok_or(RegistryError::UnknownChatbot(id))?;
        apply(chatbot).map_err(RegistryError::InvalidTransition)
    }
}

#[async_trait]
impl ChatbotRegistry for InMemoryChatbotRegistry {
    async fn register(&self, chatbot: Chatbot) -> Result<(), RegistryError> {
        let mut chatbots = self.chatbots.write().await;
        if chatbots.contains_key(&chatbot.id()) {
            return Err(RegistryError::AlreadyRegistered(chatbot.id()));
        }
        chatbots.insert(chatbot.id(), chatbot);
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: ChatbotStatus) -> Result<(), RegistryError> {
        self.update(id, |chatbot| {
            chatbot.set_status(status);
            Ok(())
        })
        .await
    }

    async fn get_status(&self, id: Uuid) -> Result<ChatbotStatus, RegistryError> {
        self.chatbots
            .read()
            .await
            .get(&id)
            .map(Chatbot::status)
            .ok_or(RegistryError::UnknownChatbot(id))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chatbot>, RegistryError> {
        Ok(self.chatbots.read().await.get(&id).cloned())
    }

    async fn record_success(&self, id: Uuid, page_count: usize) -> Result<(), RegistryError> {
        self.update(id, |chatbot| chatbot.mark_ready(page_count)).await
    }

    async fn record_failure(&self, id: Uuid, message: String) -> Result<(), RegistryError> {
        self.update(id, |chatbot| chatbot.mark_failed(message)).await
    }

    async fn count(&self) -> Result<usize, RegistryError> {
        Ok(self.chatbots.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_register_starts_creating() {
        let registry = InMemoryChatbotRegistry::new();
        let id = Uuid::new_v4();

        registry.register(Chatbot::new(id, None)).await.unwrap();

        assert_eq!(
            registry.get_status(id).await.unwrap(),
            ChatbotStatus::CreatingEmbeddings
        );
        assert!(matches!(
            registry.register(Chatbot::new(id, None)).await,
            Err(RegistryError::AlreadyRegistered(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_chatbot() {
        let registry = InMemoryChatbotRegistry::new();
        let id = Uuid::new_v4();

        assert!(matches!(
            registry.get_status(id).await,
            Err(RegistryError::UnknownChatbot(_))
        ));
        assert!(matches!(
            registry.set_status(id, ChatbotStatus::Ready).await,
            Err(RegistryError::UnknownChatbot(_))
        ));
        assert!(matches!(
            registry.record_success(id, 1).await,
            Err(RegistryError::UnknownChatbot(_))
        ));
        assert!(registry.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_status_overwrites() {
        let registry = InMemoryChatbotRegistry::new();
        let id = Uuid::new_v4();
        registry.register(Chatbot::new(id, None)).await.unwrap();

        registry.set_status(id, ChatbotStatus::Ready).await.unwrap();
        assert_eq!(registry.get_status(id).await.unwrap(), ChatbotStatus::Ready);

        registry.set_status(id, ChatbotStatus::Error).await.unwrap();
        assert_eq!(registry.get_status(id).await.unwrap(), ChatbotStatus::Error);
    }

    #[tokio::test]
    async fn test_record_success_is_final() {
        let registry = InMemoryChatbotRegistry::new();
        let id = Uuid::new_v4();
        registry.register(Chatbot::new(id, None)).await.unwrap();

        registry.record_success(id, 4).await.unwrap();
        assert_eq!(registry.get_status(id).await.unwrap(), ChatbotStatus::Ready);

        assert!(matches!(
            registry.record_failure(id, "late".to_string()).await,
            Err(RegistryError::InvalidTransition(_))
        ));
        assert_eq!(registry.get_status(id).await.unwrap(), ChatbotStatus::Ready);
    }

    #[tokio::test]
    async fn test_record_failure_keeps_message() {
        let registry = InMemoryChatbotRegistry::new();
        let id = Uuid::new_v4();
        registry.register(Chatbot::new(id, None)).await.unwrap();

        registry
            .record_failure(id, "broken xref table".to_string())
            .await
            .unwrap();

        let chatbot = registry.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(chatbot.status(), ChatbotStatus::Error);
        assert_eq!(chatbot.error_message(), Some("broken xref table"));
        assert!(matches!(
            registry.record_success(id, 3).await,
            Err(RegistryError::InvalidTransition(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_registrations() {
        let registry = Arc::new(InMemoryChatbotRegistry::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    let id = Uuid::new_v4();
                    registry.register(Chatbot::new(id, None)).await.unwrap();
                    if i % 2 == 0 {
                        registry.record_success(id, i).await.unwrap();
                    }
                    id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        assert_eq!(registry.count().await.unwrap(), 32);
        let ready = registry
            .all()
            .await
            .into_iter()
            .filter(|chatbot| chatbot.status().is_ready())
            .count();
        assert_eq!(ready, 16);
    }
}
