//! Core traits and types for Solyntra
//!
//! This crate defines the fundamental traits and types used across the Solyntra system.
//! It provides capability-facing interfaces for embedding providers, LLM providers,
//! vector indexes and the RAG engine, making the system test-friendly and extensible.

pub mod config;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod rag;
pub mod types;
pub mod vector_store;


pub use config::RagConfig;
pub use embedding::{Embedding, EmbeddingProvider};
pub use error::{Error, Result};
pub use llm::{ChatMessage, GenerationConfig, GenerationResult, LLMProvider, Role};
pub use rag::{AnswerResult, QueryMetrics, RAGEngine, SourceSnippet};
pub use types::*;
pub use vector_store::{ChunkMetadata, IndexRecord, SearchHit, VectorIndex};
