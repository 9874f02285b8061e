use async_trait::async_trait;
use std::path::Path;

#[derive(Debug)]
pub enum DocumentExtractionError {
    ParseError(String),
    EncryptedDocument(String),
    IoError(String),
}

impl std::fmt::Display for DocumentExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentExtractionError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DocumentExtractionError::EncryptedDocument(msg) => {
                write!(f, "Encrypted document: {}", msg)
            }
            DocumentExtractionError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentExtractionError {}

/// Splits a paginated document into the plain text of each page.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Page texts in source order. A page without a text layer yields `""`.
    async fn extract_pages(&self, file_path: &Path) -> Result<Vec<String>, DocumentExtractionError>;
}
