use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    DocumentExtractor, RetrievalEngine, document_extractor::DocumentExtractionError,
    retrieval_engine::RetrievalEngineError,
};
use crate::domain::entities::DocumentUnit;

const BATCH_SIZE: usize = 10;

#[derive(Debug)]
pub enum IndexBuildError {
    ParseError(String),
    DuplicateCollection(String),
    IndexingError(String),
    Timeout(u64),
}

impl std::fmt::Display for IndexBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexBuildError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            IndexBuildError::DuplicateCollection(name) => {
                write!(f, "Collection already exists: {}", name)
            }
            IndexBuildError::IndexingError(msg) => write!(f, "Indexing error: {}", msg),
            IndexBuildError::Timeout(secs) => {
                write!(f, "Indexing did not finish within {}s", secs)
            }
        }
    }
}

impl std::error::Error for IndexBuildError {}

impl From<DocumentExtractionError> for IndexBuildError {
    fn from(error: DocumentExtractionError) -> Self {
        IndexBuildError::ParseError(error.to_string())
    }
}

impl From<RetrievalEngineError> for IndexBuildError {
    fn from(error: RetrievalEngineError) -> Self {
        match error {
            RetrievalEngineError::DuplicateCollection(name) => {
                IndexBuildError::DuplicateCollection(name)
            }
            _ => IndexBuildError::IndexingError(error.to_string()),
        }
    }
}

/// Turns a stored document into per-page units and loads them into a collection.
pub struct IndexBuilderService {
    document_extractor: Arc<dyn DocumentExtractor>,
    retrieval_engine: Arc<dyn RetrievalEngine>,
    call_timeout: Duration,
}

impl IndexBuilderService {
    pub fn new(
        document_extractor: Arc<dyn DocumentExtractor>,
        retrieval_engine: Arc<dyn RetrievalEngine>,
    ) -> Self {
        Self {
            document_extractor,
            retrieval_engine,
            call_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Extract then index. Returns the number of units in the collection afterwards.
    pub async fn build_index(
        &self,
        collection: &str,
        file_path: &Path,
    ) -> Result<usize, IndexBuildError> {
        let units = self.build_units(file_path).await?;
        self.populate_collection(collection, &units).await
    }

    /// One unit per page, in page order, each tagged with its zero-based page index.
    pub async fn build_units(&self, file_path: &Path) -> Result<Vec<DocumentUnit>, IndexBuildError> {
        let pages = self.document_extractor.extract_pages(file_path).await?;

        let units: Vec<DocumentUnit> = pages
            .into_iter()
            .enumerate()
            .map(|(page_index, text)| DocumentUnit::for_page(page_index, text))
            .collect();

        let blank_pages = units.iter().filter(|unit| unit.is_empty()).count();
        if blank_pages > 0 {
            tracing::warn!(
                "{} of {} pages in {} have no extractable text",
                blank_pages,
                units.len(),
                file_path.display()
            );
        }

        Ok(units)
    }

    pub async fn populate_collection(
        &self,
        collection: &str,
        units: &[DocumentUnit],
    ) -> Result<usize, IndexBuildError> {
        self.retrieval_engine.create_collection(collection).await?;

        for unit_batch in units.chunks(BATCH_SIZE) {
            let mut ids = Vec::with_capacity(unit_batch.len());
            let mut contents = Vec::with_capacity(unit_batch.len());
            let mut metadatas = Vec::with_capacity(unit_batch.len());

            for unit in unit_batch {
                ids.push(unit.id().to_string());
                contents.push(unit.content().to_string());
                metadatas.push(unit.metadata().clone());
            }

            tokio::time::timeout(
                self.call_timeout,
                self.retrieval_engine.add(collection, ids, contents, metadatas),
            )
            .await
            .map_err(|_| IndexBuildError::Timeout(self.call_timeout.as_secs()))??;
        }

        let stored = self.retrieval_engine.count(collection).await?;
        tracing::info!("Indexed {} units into collection {}", stored, collection);

        Ok(stored)
    }
}
