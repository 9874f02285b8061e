pub mod in_memory_engine;

pub use in_memory_engine::InMemoryRetrievalEngine;
