use std::{sync::Arc, time::Duration};

use crate::{
    application::{
        ports::{DocumentExtractor, EmbeddingProvider, FileStorage, LanguageModel, RetrievalEngine},
        services::{IndexBuilderService, RetrieverService},
        use_cases::{AskChatbotUseCase, BuildChatbotUseCase, GetChatbotStatusUseCase},
    },
    domain::repositories::ChatbotRegistry,
    infrastructure::{
        config::AppConfig,
        external_services::{
            ChatCompletionLanguageModel, EmbeddingsClientConfig, HashingEmbeddingProvider,
            InMemoryRetrievalEngine, InferenceClient, InferenceEmbeddingProvider,
            LanguageModelConfig, PdfExtractor,
        },
        file_system::LocalFileStorage,
        registry::InMemoryChatbotRegistry,
    },
    presentation::http::handlers::ChatbotHandler,
};

pub struct AppContainer {
    pub config: AppConfig,

    // HTTP Handlers
    pub chatbot_handler: Arc<ChatbotHandler>,
}

impl AppContainer {
    pub async fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let call_timeout = Duration::from_secs(config.external_call_timeout_secs);

        let registry: Arc<dyn ChatbotRegistry> = Arc::new(InMemoryChatbotRegistry::new());

        let storage = LocalFileStorage::new(config.upload_dir.clone());
        storage
            .ensure_directory_exists()
            .await
            .map_err(|e| format!("Failed to create upload directory: {}", e))?;
        let file_storage: Arc<dyn FileStorage> = Arc::new(storage);

        let document_extractor: Arc<dyn DocumentExtractor> = Arc::new(PdfExtractor::new());

        let embedding_provider: Arc<dyn EmbeddingProvider> = match &config.embeddings_service_url {
            Some(service_url) => {
                let client = InferenceClient::new(
                    EmbeddingsClientConfig::new(
                        service_url.clone(),
                        config.external_call_timeout_secs,
                    )
                    .with_max_retries(config.embeddings_max_retries),
                )?;
                Arc::new(InferenceEmbeddingProvider::new(client))
            }
            None => Arc::new(HashingEmbeddingProvider::new(config.embedding_dimensions)),
        };
        let (embedding_model, embedding_detail) = embedding_provider.model_info();
        tracing::info!(
            "Embedding with {} ({})",
            embedding_model,
            embedding_detail.as_deref().unwrap_or("remote service")
        );

        let retrieval_engine: Arc<dyn RetrievalEngine> =
            Arc::new(InMemoryRetrievalEngine::new(embedding_provider));

        let language_model: Arc<dyn LanguageModel> =
            Arc::new(ChatCompletionLanguageModel::new(LanguageModelConfig {
                base_url: config.llm_base_url.clone(),
                api_key: config.openai_api_key.clone(),
                model: config.llm_model.clone(),
                timeout_secs: config.external_call_timeout_secs,
            })?);
        tracing::info!(
            "Answering with {} at {}",
            language_model.model_name(),
            config.llm_base_url
        );

        // Create application services
        let index_builder = Arc::new(
            IndexBuilderService::new(document_extractor, retrieval_engine.clone())
                .with_call_timeout(call_timeout),
        );
        let retriever =
            Arc::new(RetrieverService::new(retrieval_engine).with_call_timeout(call_timeout));

        // Create use cases
        let build_chatbot_use_case = Arc::new(BuildChatbotUseCase::new(
            registry.clone(),
            file_storage,
            index_builder,
        ));
        let ask_chatbot_use_case = Arc::new(
            AskChatbotUseCase::new(registry.clone(), retriever, language_model)
                .with_call_timeout(call_timeout),
        );
        let get_chatbot_status_use_case = Arc::new(GetChatbotStatusUseCase::new(registry));

        // Create HTTP handlers
        let chatbot_handler = Arc::new(ChatbotHandler::new(
            build_chatbot_use_case,
            ask_chatbot_use_case,
            get_chatbot_status_use_case,
        ));

        Ok(Self {
            config,
            chatbot_handler,
        })
    }
}
