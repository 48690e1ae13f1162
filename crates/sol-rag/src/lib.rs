//! Retrieval pipeline for Solyntra
//!
//! This crate provides the word chunker, the query-embedding cache, a flat L2
//! vector index, the answer generator and the engine that ties them together.

mod cache;
mod chunker;
mod embedder;
mod engine;
mod generator;
mod metrics;
mod vector_store;


pub use cache::LruCache;
pub use chunker::WordChunker;
pub use embedder::EmbeddingClient;
pub use engine::{NO_RELEVANT_INFORMATION, RetrievalEngine, SNIPPET_CHARS, build_context, snippet};
pub use generator::{AnswerGenerator, LLM_NOT_CONFIGURED, build_messages};
pub use metrics::Metrics;
pub use vector_store::FlatL2Index;

// Re-export core types for convenience
pub use sol_core::{
    AnswerResult, IngestReport, MetricsSnapshot, RAGEngine, RagConfig, Error, Result,
    VectorIndex,
};
