pub mod document_extractors;
pub mod hashing_embedder;
pub mod inference_client;
pub mod llm_client;
pub mod vector_store;

pub use document_extractors::PdfExtractor;
pub use hashing_embedder::HashingEmbeddingProvider;
pub use inference_client::{EmbeddingsClientConfig, InferenceClient, InferenceEmbeddingProvider};
pub use llm_client::{ChatCompletionLanguageModel, LanguageModelConfig};
pub use vector_store::InMemoryRetrievalEngine;
