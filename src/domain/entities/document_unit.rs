use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::UnitMetadata;

/// One retrievable chunk of a source document; here, one PDF page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUnit {
    id: String,
    content: String,
    metadata: UnitMetadata,
}

impl DocumentUnit {
    pub fn new(content: String, metadata: UnitMetadata) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            metadata,
        }
    }

    pub fn for_page(page_index: usize, content: String) -> Self {
        Self::new(content, UnitMetadata::for_page(page_index))
    }

    /// Rebuild a unit returned by the retrieval engine, keeping its stored id.
    pub fn from_parts(id: String, content: String, metadata: UnitMetadata) -> Self {
        Self {
            id,
            content,
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &UnitMetadata {
        &self.metadata
    }

    pub fn page_number(&self) -> Option<&str> {
        self.metadata.page_number()
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_creation() {
        let unit = DocumentUnit::for_page(2, "Some page text here".to_string());

        assert_eq!(unit.page_number(), Some("2"));
        assert_eq!(unit.content(), "Some page text here");
        assert!(!unit.is_empty());
        assert!(Uuid::parse_str(unit.id()).is_ok());
    }

    #[test]
    fn test_blank_page_is_kept() {
        let unit = DocumentUnit::for_page(0, String::new());

        assert!(unit.is_empty());
        assert_eq!(unit.content(), "");
        assert_eq!(unit.page_number(), Some("0"));
    }

    #[test]
    fn test_ids_are_unique() {
        let first = DocumentUnit::for_page(0, "a".to_string());
        let second = DocumentUnit::for_page(0, "a".to_string());
        assert_ne!(first.id(), second.id());
    }
}
