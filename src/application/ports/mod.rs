pub mod document_extractor;
pub mod embedding_provider;
pub mod file_storage;
pub mod language_model;
pub mod retrieval_engine;

pub use document_extractor::DocumentExtractor;
pub use embedding_provider::EmbeddingProvider;
pub use file_storage::FileStorage;
pub use language_model::LanguageModel;
pub use retrieval_engine::RetrievalEngine;
