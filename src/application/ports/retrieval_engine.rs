use async_trait::async_trait;

use crate::domain::value_objects::UnitMetadata;

#[derive(Debug)]
pub enum RetrievalEngineError {
    DuplicateCollection(String),
    CollectionNotFound(String),
    InvalidInput(String),
    EmbeddingError(String),
}

impl std::fmt::Display for RetrievalEngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalEngineError::DuplicateCollection(name) => {
                write!(f, "Collection already exists: {}", name)
            }
            RetrievalEngineError::CollectionNotFound(name) => {
                write!(f, "Collection not found: {}", name)
            }
            RetrievalEngineError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            RetrievalEngineError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
        }
    }
}

impl std::error::Error for RetrievalEngineError {}

/// Column-oriented query result as produced by a retrieval engine.
///
/// Columns are parallel arrays ranked by descending relevance. Engines are not
/// trusted to keep them aligned: `documents` or `metadatas` may be missing or
/// shorter than `ids`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQueryResult {
    pub ids: Option<Vec<String>>,
    pub documents: Option<Vec<String>>,
    pub metadatas: Option<Vec<UnitMetadata>>,
}

#[async_trait]
pub trait RetrievalEngine: Send + Sync {
    /// Fails with `DuplicateCollection` if `name` is taken.
    async fn create_collection(&self, name: &str) -> Result<(), RetrievalEngineError>;

    /// Inserts parallel `(id, content, metadata)` columns into `name`.
    async fn add(
        &self,
        name: &str,
        ids: Vec<String>,
        contents: Vec<String>,
        metadatas: Vec<UnitMetadata>,
    ) -> Result<(), RetrievalEngineError>;

    async fn query(
        &self,
        name: &str,
        text: &str,
        n_results: usize,
    ) -> Result<RawQueryResult, RetrievalEngineError>;

    async fn count(&self, name: &str) -> Result<usize, RetrievalEngineError>;
}
