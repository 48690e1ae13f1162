//! RAG (Retrieval-Augmented Generation) engine trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{IngestReport, MetricsSnapshot, Result};

/// A retrieved chunk as shown to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSnippet {
    pub source: String,
    pub snippet: String,
}

/// Latency bookkeeping attached to every answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetrics {
    pub latency_seconds: f64,
    pub avg_latency_seconds: f64,
    pub total_queries: u64,
}

/// Answer to a question, with the chunks it was grounded on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub sources: Vec<SourceSnippet>,
    pub metrics: QueryMetrics,
}

/// Trait for RAG engines
///
/// This is the whole surface the HTTP boundary talks to: ingest text, answer
/// questions, and report counters.
#[async_trait]
pub trait RAGEngine: Send + Sync {
    /// Chunk, embed and index a document's text
    async fn add_document(&self, text: &str, source: &str) -> Result<IngestReport>;

    /// Retrieve the nearest chunks for a question and generate an answer
    async fn answer_query(&self, query: &str) -> Result<AnswerResult>;

    /// Number of vectors currently indexed
    async fn vector_count(&self) -> Result<usize>;

    /// Current upload/query counters
    fn metrics(&self) -> MetricsSnapshot;
}
