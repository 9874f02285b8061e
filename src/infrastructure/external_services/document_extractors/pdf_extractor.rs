use async_trait::async_trait;
use lopdf::Document;
use lopdf::Object;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::path::{Path, PathBuf};

use crate::application::ports::document_extractor::{DocumentExtractionError, DocumentExtractor};

// Encrypted uploads are only readable when they open with an empty user password.
const USER_PASSWORD: &str = "";

#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn filter_func(object_id: (u32, u16), object: &mut Object) -> Option<((u32, u16), Object)> {
        static IGNORE: &[&[u8]] = &[
            b"Length",
            b"BBox",
            b"Matrix",
            b"Filter",
            b"ColorSpace",
            b"Width",
            b"Height",
            b"BitsPerComponent",
            b"PTEX.FileName",
            b"PTEX.PageNumber",
            b"PTEX.InfoDict",
            b"FontDescriptor",
            b"ExtGState",
            b"MediaBox",
        ];

        if let Object::Dictionary(dict) = object {
            let keys_to_remove: Vec<_> = dict
                .iter()
                .filter(|(key, _)| IGNORE.contains(&key.as_slice()))
                .map(|(key, _)| key.clone())
                .collect();
            for key in keys_to_remove {
                dict.remove(&key);
            }
        }

        Some((object_id, object.to_owned()))
    }

    fn load_document(path: &Path) -> Result<Document, DocumentExtractionError> {
        let mut doc = Document::load_filtered(path, Self::filter_func)
            .map_err(|e| DocumentExtractionError::ParseError(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(USER_PASSWORD).map_err(|_e| {
                DocumentExtractionError::EncryptedDocument(
                    "Failed to decrypt PDF - invalid password".to_string(),
                )
            })?;
        }

        Ok(doc)
    }

    /// Page texts ordered by page number. Pages lopdf cannot decode come back empty.
    fn extract_page_texts(doc: &Document) -> Vec<String> {
        let pages: Vec<u32> = doc.get_pages().into_keys().collect();

        let mut extracted: Vec<(u32, String)> = pages
            .into_par_iter()
            .map(|page_num| {
                let text = match doc.extract_text(&[page_num]) {
                    Ok(text) => text
                        .split('\n')
                        .map(|line| line.trim_end())
                        .filter(|line| !line.is_empty())
                        .collect::<Vec<_>>()
                        .join("\n"),
                    Err(e) => {
                        tracing::warn!("Failed to extract text from page {}: {}", page_num, e);
                        String::new()
                    }
                };
                (page_num, text)
            })
            .collect();

        extracted.sort_by_key(|(page_num, _)| *page_num);
        extracted.into_iter().map(|(_, text)| text).collect()
    }

    /// A document without pages yields an empty list, not an error.
    fn extract_blocking(path: PathBuf) -> Result<Vec<String>, DocumentExtractionError> {
        let doc = Self::load_document(&path)?;
        let pages = Self::extract_page_texts(&doc);

        if pages.is_empty() {
            tracing::warn!("{} contains no pages", path.display());
        }

        Ok(pages)
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_pages(&self, file_path: &Path) -> Result<Vec<String>, DocumentExtractionError> {
        if !tokio::fs::try_exists(file_path).await.unwrap_or(false) {
            return Err(DocumentExtractionError::IoError(format!(
                "File not found: {}",
                file_path.display()
            )));
        }

        let path = file_path.to_path_buf();

        tokio::task::spawn_blocking(move || Self::extract_blocking(path))
            .await
            .map_err(|e| DocumentExtractionError::ParseError(format!("Extraction task failed: {}", e)))?
    }
}
