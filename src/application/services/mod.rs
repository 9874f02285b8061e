pub mod index_builder;
pub mod retriever;

pub use index_builder::IndexBuilderService;
pub use retriever::RetrieverService;
