use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    RetrievalEngine,
    retrieval_engine::{RawQueryResult, RetrievalEngineError},
};
use crate::domain::entities::DocumentUnit;

pub const TOP_K: usize = 3;

#[derive(Debug)]
pub enum RetrievalError {
    CollectionNotFound(String),
    EngineError(String),
    Timeout(u64),
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::CollectionNotFound(name) => write!(f, "Collection not found: {}", name),
            RetrievalError::EngineError(msg) => write!(f, "Retrieval engine error: {}", msg),
            RetrievalError::Timeout(secs) => {
                write!(f, "Retrieval did not finish within {}s", secs)
            }
        }
    }
}

impl std::error::Error for RetrievalError {}

impl From<RetrievalEngineError> for RetrievalError {
    fn from(error: RetrievalEngineError) -> Self {
        match error {
            RetrievalEngineError::CollectionNotFound(name) => {
                RetrievalError::CollectionNotFound(name)
            }
            _ => RetrievalError::EngineError(error.to_string()),
        }
    }
}

/// Classified engine response. Malformed results degrade instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalOutcome {
    WellFormed { units: Vec<DocumentUnit> },
    Degraded { units: Vec<DocumentUnit>, dropped: usize },
    Empty,
}

impl RetrievalOutcome {
    /// Keeps the longest prefix where `ids`, `documents` and `metadatas` all
    /// have an entry, capped at `limit`. Only the first `limit` rows are
    /// checked for alignment; anything past them is ignored.
    pub fn from_raw(raw: RawQueryResult, limit: usize) -> Self {
        let ids = raw.ids.unwrap_or_default();
        if ids.is_empty() {
            return RetrievalOutcome::Empty;
        }

        let documents = raw.documents.unwrap_or_default();
        let metadatas = raw.metadatas.unwrap_or_default();

        let window = ids.len().min(limit);
        let aligned = window.min(documents.len()).min(metadatas.len());

        let units: Vec<DocumentUnit> = ids
            .into_iter()
            .zip(documents)
            .zip(metadatas)
            .take(aligned)
            .map(|((id, content), metadata)| DocumentUnit::from_parts(id, content, metadata))
            .collect();

        if units.is_empty() {
            RetrievalOutcome::Empty
        } else if aligned < window {
            RetrievalOutcome::Degraded {
                dropped: window - aligned,
                units,
            }
        } else {
            RetrievalOutcome::WellFormed { units }
        }
    }

    pub fn into_units(self) -> Vec<DocumentUnit> {
        match self {
            RetrievalOutcome::WellFormed { units } | RetrievalOutcome::Degraded { units, .. } => {
                units
            }
            RetrievalOutcome::Empty => Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, RetrievalOutcome::Degraded { .. })
    }
}

pub struct RetrieverService {
    retrieval_engine: Arc<dyn RetrievalEngine>,
    top_k: usize,
    call_timeout: Duration,
}

impl RetrieverService {
    pub fn new(retrieval_engine: Arc<dyn RetrievalEngine>) -> Self {
        Self {
            retrieval_engine,
            top_k: TOP_K,
            call_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub async fn retrieve(
        &self,
        collection: &str,
        query: &str,
    ) -> Result<RetrievalOutcome, RetrievalError> {
        let raw = tokio::time::timeout(
            self.call_timeout,
            self.retrieval_engine.query(collection, query, self.top_k),
        )
        .await
        .map_err(|_| RetrievalError::Timeout(self.call_timeout.as_secs()))??;

        let outcome = RetrievalOutcome::from_raw(raw, self.top_k);

        if let RetrievalOutcome::Degraded { units, dropped } = &outcome {
            tracing::warn!(
                "Malformed retrieval result for collection {}: kept {} units, dropped {}",
                collection,
                units.len(),
                dropped
            );
        }

        Ok(outcome)
    }
}
