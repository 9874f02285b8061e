use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::EmbeddingProvider;
use crate::application::ports::retrieval_engine::{
    RawQueryResult, RetrievalEngine, RetrievalEngineError,
};
use crate::domain::value_objects::UnitMetadata;

#[derive(Debug, Clone)]
struct StoredEntry {
    id: String,
    content: String,
    metadata: UnitMetadata,
    embedding: Vec<f32>,
}

/// Named collections of embedded entries, searched by cosine similarity.
///
/// Embeddings are computed before the collection lock is taken, so a slow
/// embedding backend never blocks readers of other collections.
pub struct InMemoryRetrievalEngine {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    collections: RwLock<HashMap<String, Vec<StoredEntry>>>,
}

impl InMemoryRetrievalEngine {
    pub fn new(embedding_provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedding_provider,
            collections: RwLock::new(HashMap::new()),
        }
    }

    async fn ensure_collection(&self, name: &str) -> Result<(), RetrievalEngineError> {
        if self.collections.read().await.contains_key(name) {
            Ok(())
        } else {
            Err(RetrievalEngineError::CollectionNotFound(name.to_string()))
        }
    }
}

/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl RetrievalEngine for InMemoryRetrievalEngine {
    async fn create_collection(&self, name: &str) -> Result<(), RetrievalEngineError> {
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Err(RetrievalEngineError::DuplicateCollection(name.to_string()));
        }
        collections.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn add(
        &self,
        name: &str,
        ids: Vec<String>,
        contents: Vec<String>,
        metadatas: Vec<UnitMetadata>,
    ) -> Result<(), RetrievalEngineError> {
        if ids.len() != contents.len() || ids.len() != metadatas.len() {
            return Err(RetrievalEngineError::InvalidInput(format!(
                "column lengths differ: {} ids, {} contents, {} metadatas",
                ids.len(),
                contents.len(),
                metadatas.len()
            )));
        }

        self.ensure_collection(name).await?;

        let embeddings = self
            .embedding_provider
            .embed_batch(&contents)
            .await
            .map_err(|e| RetrievalEngineError::EmbeddingError(e.to_string()))?;

        if embeddings.len() != contents.len() {
            return Err(RetrievalEngineError::EmbeddingError(format!(
                "expected {} embeddings, got {}",
                contents.len(),
                embeddings.len()
            )));
        }

        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(name)
            .ok_or_else(|| RetrievalEngineError::CollectionNotFound(name.to_string()))?;

        for (((id, content), metadata), embedding) in
            ids.into_iter().zip(contents).zip(metadatas).zip(embeddings)
        {
            entries.push(StoredEntry {
                id,
                content,
                metadata,
                embedding,
            });
        }

        Ok(())
    }

    async fn query(
        &self,
        name: &str,
        text: &str,
        n_results: usize,
    ) -> Result<RawQueryResult, RetrievalEngineError> {
        self.ensure_collection(name).await?;

        let query_embedding = self
            .embedding_provider
            .embed(text)
            .await
            .map_err(|e| RetrievalEngineError::EmbeddingError(e.to_string()))?;

        let collections = self.collections.read().await;
        let entries = collections
            .get(name)
            .ok_or_else(|| RetrievalEngineError::CollectionNotFound(name.to_string()))?;

        let mut scored: Vec<(f32, &StoredEntry)> = entries
            .iter()
            .map(|entry| (cosine_similarity(&entry.embedding, &query_embedding), entry))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n_results);

        let mut result = RawQueryResult {
            ids: Some(Vec::with_capacity(scored.len())),
            documents: Some(Vec::with_capacity(scored.len())),
            metadatas: Some(Vec::with_capacity(scored.len())),
        };
        for (_, entry) in scored {
            if let (Some(ids), Some(documents), Some(metadatas)) =
                (&mut result.ids, &mut result.documents, &mut result.metadatas)
            {
                ids.push(entry.id.clone());
                documents.push(entry.content.clone());
                metadatas.push(entry.metadata.clone());
            }
        }

        Ok(result)
    }

    async fn count(&self, name: &str) -> Result<usize, RetrievalEngineError> {
        self.collections
            .read()
            .await
            .get(name)
            .map(Vec::len)
            .ok_or_else(|| RetrievalEngineError::CollectionNotFound(name.to_string()))
    }
}
