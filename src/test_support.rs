use async_trait::async_trait;
use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

use crate::application::ports::document_extractor::{DocumentExtractionError, DocumentExtractor};
use crate::application::ports::language_model::{LanguageModel, LanguageModelError};
use crate::application::ports::retrieval_engine::{RawQueryResult, RetrievalEngineError};
use crate::application::ports::{FileStorage, RetrievalEngine};
use crate::application::services::{IndexBuilderService, RetrieverService};
use crate::application::use_cases::build_chatbot::BuildChatbotRequest;
use crate::application::use_cases::{
    AskChatbotUseCase, BuildChatbotUseCase, GetChatbotStatusUseCase,
};
use crate::domain::entities::DocumentUnit;
use crate::domain::value_objects::UnitMetadata;
use crate::infrastructure::external_services::{
    HashingEmbeddingProvider, InMemoryRetrievalEngine, PdfExtractor,
};
use crate::infrastructure::file_system::LocalFileStorage;
use crate::infrastructure::registry::InMemoryChatbotRegistry;
use crate::presentation::http::handlers::ChatbotHandler;
use crate::presentation::http::server::{DEFAULT_MAX_UPLOAD_BYTES, router};

pub const TWO_PAGE_TEXTS: [&str; 2] = ["Hello world", "Page two text"];

/// A minimal PDF with one Helvetica text line per page; `""` gives a blank page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Returns `(content_type, body)` for a single-field multipart upload.
pub fn multipart_body(field_name: &str, file_name: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "pdfchat-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}

pub fn in_memory_engine() -> Arc<dyn RetrievalEngine> {
    Arc::new(InMemoryRetrievalEngine::new(Arc::new(
        HashingEmbeddingProvider::default(),
    )))
}

pub struct StaticPagesExtractor {
    pages: Vec<String>,
}

impl StaticPagesExtractor {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|page| page.to_string()).collect(),
        }
    }
}

#[async_trait]
impl DocumentExtractor for StaticPagesExtractor {
    async fn extract_pages(&self, _file_path: &Path) -> Result<Vec<String>, DocumentExtractionError> {
        Ok(self.pages.clone())
    }
}

pub struct FailingExtractor;

#[async_trait]
impl DocumentExtractor for FailingExtractor {
    async fn extract_pages(&self, file_path: &Path) -> Result<Vec<String>, DocumentExtractionError> {
        Err(DocumentExtractionError::ParseError(format!(
            "cannot parse {}",
            file_path.display()
        )))
    }
}

/// Echoes the question followed by the pages it was given, in order.
pub struct StubLanguageModel;

#[async_trait]
impl LanguageModel for StubLanguageModel {
    async fn answer(
        &self,
        question: &str,
        context: &[DocumentUnit],
    ) -> Result<String, LanguageModelError> {
        let pages: Vec<&str> = context
            .iter()
            .map(|unit| unit.page_number().unwrap_or("?"))
            .collect();
        Ok(format!("{} [pages {}]", question, pages.join(",")))
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

pub struct FailingLanguageModel;

#[async_trait]
impl LanguageModel for FailingLanguageModel {
    async fn answer(
        &self,
        _question: &str,
        _context: &[DocumentUnit],
    ) -> Result<String, LanguageModelError> {
        Err(LanguageModelError::ApiError("model unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

const STALL: Duration = Duration::from_secs(5);

/// Accepts collections but stalls on every add and query.
pub struct SlowRetrievalEngine;

#[async_trait]
impl RetrievalEngine for SlowRetrievalEngine {
    async fn create_collection(&self, _name: &str) -> Result<(), RetrievalEngineError> {
        Ok(())
    }

    async fn add(
        &self,
        _name: &str,
        _ids: Vec<String>,
        _contents: Vec<String>,
        _metadatas: Vec<UnitMetadata>,
    ) -> Result<(), RetrievalEngineError> {
        tokio::time::sleep(STALL).await;
        Ok(())
    }

    async fn query(
        &self,
        _name: &str,
        _text: &str,
        _n_results: usize,
    ) -> Result<RawQueryResult, RetrievalEngineError> {
        tokio::time::sleep(STALL).await;
        Ok(RawQueryResult::default())
    }

    async fn count(&self, _name: &str) -> Result<usize, RetrievalEngineError> {
        Ok(0)
    }
}

pub struct SlowLanguageModel;

#[async_trait]
impl LanguageModel for SlowLanguageModel {
    async fn answer(
        &self,
        _question: &str,
        _context: &[DocumentUnit],
    ) -> Result<String, LanguageModelError> {
        tokio::time::sleep(STALL).await;
        Ok("too late".to_string())
    }

    fn model_name(&self) -> &str {
        "slow"
    }
}

/// Real registry, storage, PDF extractor and in-memory engine over a temp
/// directory, with a stubbed language model.
pub struct TestHarness {
    upload_dir: TempDir,
    pub registry: Arc<InMemoryChatbotRegistry>,
    pub file_storage: Arc<LocalFileStorage>,
    pub retrieval_engine: Arc<dyn RetrievalEngine>,
    pub language_model: Arc<dyn LanguageModel>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_language_model(Arc::new(StubLanguageModel))
    }

    pub fn with_failing_model() -> Self {
        Self::with_language_model(Arc::new(FailingLanguageModel))
    }

    pub fn with_language_model(language_model: Arc<dyn LanguageModel>) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let file_storage = Arc::new(LocalFileStorage::new(upload_dir.path().to_path_buf()));

        Self {
            upload_dir,
            registry: Arc::new(InMemoryChatbotRegistry::new()),
            file_storage,
            retrieval_engine: in_memory_engine(),
            language_model,
        }
    }

    /// Where the storage keeps `file_name` for `chatbot_id`.
    pub fn upload_path(&self, chatbot_id: Uuid, file_name: &str) -> PathBuf {
        self.upload_dir
            .path()
            .join(chatbot_id.to_string())
            .join(file_name)
    }

    pub fn two_page_pdf(&self) -> Vec<u8> {
        pdf_with_pages(&TWO_PAGE_TEXTS)
    }

    pub fn build_use_case(&self) -> BuildChatbotUseCase {
        let index_builder = Arc::new(IndexBuilderService::new(
            Arc::new(PdfExtractor::new()),
            self.retrieval_engine.clone(),
        ));
        BuildChatbotUseCase::new(
            self.registry.clone(),
            self.file_storage.clone() as Arc<dyn FileStorage>,
            index_builder,
        )
    }

    pub fn ask_use_case(&self) -> AskChatbotUseCase {
        AskChatbotUseCase::new(
            self.registry.clone(),
            Arc::new(RetrieverService::new(self.retrieval_engine.clone())),
            self.language_model.clone(),
        )
    }

    pub fn status_use_case(&self) -> GetChatbotStatusUseCase {
        GetChatbotStatusUseCase::new(self.registry.clone())
    }

    pub async fn build_two_page_chatbot(&self) -> Uuid {
        self.build_use_case()
            .execute(BuildChatbotRequest {
                file_name: "two-pages.pdf".to_string(),
                file_data: self.two_page_pdf(),
            })
            .await
            .unwrap()
            .chatbot_id
    }

    pub fn router(&self) -> Router {
        self.router_with_limit(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn router_with_limit(&self, max_upload_bytes: usize) -> Router {
        let handler = Arc::new(ChatbotHandler::new(
            Arc::new(self.build_use_case()),
            Arc::new(self.ask_use_case()),
            Arc::new(self.status_use_case()),
        ));
        router(handler, max_upload_bytes)
    }
}
