//! Retrieval engine: ingestion and query pipelines

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{info, warn};

use sol_core::{
    AnswerResult, ChunkMetadata, DocumentId, EmbeddingProvider, GenerationConfig, IndexRecord,
    IngestReport, LLMProvider, MetricsSnapshot, QueryMetrics, RAGEngine, RagConfig, Result,
    SourceSnippet, VectorIndex,
};

use crate::chunker::WordChunker;
use crate::embedder::EmbeddingClient;
use crate::generator::AnswerGenerator;
use crate::metrics::Metrics;

/// Answer returned when the index holds nothing to retrieve
pub const NO_RELEVANT_INFORMATION: &str = "No relevant information found in the uploaded documents.";

/// Characters of chunk text shown per source
pub const SNIPPET_CHARS: usize = 200;

/// Local RAG engine over a vector index and external providers
pub struct RetrievalEngine {
    chunker: WordChunker,
    embedder: EmbeddingClient,
    index: Arc<dyn VectorIndex>,
    generator: AnswerGenerator,
    metrics: Metrics,
    next_doc_id: AtomicU64,
    top_k: usize,
}

impl RetrievalEngine {
    /// Create a new engine; document ids start at 0
    pub fn new(
        config: &RagConfig,
        embeddings: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LLMProvider>,
        generation: GenerationConfig,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            chunker: WordChunker::from(config),
            embedder: EmbeddingClient::new(
                embeddings,
                config.embedding_dimension,
                config.query_cache_capacity,
            ),
            index,
            generator: AnswerGenerator::new(llm, generation),
            metrics: Metrics::new(),
            next_doc_id: AtomicU64::new(0),
            top_k: config.top_k,
        }
    }

    pub fn embedder(&self) -> &EmbeddingClient {
        &self.embedder
    }

    fn allocate_doc_id(&self) -> DocumentId {
        DocumentId(self.next_doc_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Nearest records for `query`, nearest first
    async fn retrieve(&self, query: &str) -> Result<Vec<IndexRecord>> {
        let vector = self.embedder.embed_query(query).await?;
        let hits = self.index.search(&vector, self.top_k).await?;

        let mut records = Vec::with_capacity(hits.len());
        for hit in hits {
            if let Some(record) = self.index.get(hit.position).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn run_query(&self, query: &str) -> Result<(String, Vec<SourceSnippet>)> {
        if self.index.count().await? == 0 {
            warn!("Query against an empty index");
            return Ok((NO_RELEVANT_INFORMATION.to_string(), Vec::new()));
        }

        let records = self.retrieve(query).await?;
        let context = build_context(&records);
        let answer = self.generator.generate(query, &context).await?;

        let sources = records
            .iter()
            .map(|record| SourceSnippet {
                source: record.metadata.source.clone(),
                snippet: snippet(&record.text),
            })
            .collect();

        Ok((answer, sources))
    }
}

#[async_trait]
impl RAGEngine for RetrievalEngine {
    async fn add_document(&self, text: &str, source: &str) -> Result<IngestReport> {
        self.metrics.record_upload();

        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            let doc_id = self.allocate_doc_id();
            warn!(%doc_id, source, "Document produced no chunks");
            return Ok(IngestReport {
                doc_id,
                source: source.to_string(),
                chunks: 0,
            });
        }

        let vectors = self.embedder.embed(&chunks).await?;
        let doc_id = self.allocate_doc_id();
        let chunk_count = chunks.len();

        let records = chunks
            .into_iter()
            .zip(vectors)
            .enumerate()
            .map(|(chunk_index, (text, vector))| IndexRecord {
                vector,
                text,
                metadata: ChunkMetadata {
                    doc_id,
                    chunk_index,
                    source: source.to_string(),
                },
            })
            .collect();

        self.index.add(records).await?;

        info!(%doc_id, source, chunks = chunk_count, "Indexed document");
        Ok(IngestReport {
            doc_id,
            source: source.to_string(),
            chunks: chunk_count,
        })
    }

    async fn answer_query(&self, query: &str) -> Result<AnswerResult> {
        self.metrics.record_query();
        let started = Instant::now();

        let (answer, sources) = self.run_query(query).await?;

        let elapsed = started.elapsed();
        self.metrics.record_latency(elapsed);
        let snapshot = self.metrics.snapshot();

        info!(
            sources = sources.len(),
            latency_ms = elapsed.as_millis() as u64,
            "Answered query"
        );

        Ok(AnswerResult {
            answer,
            sources,
            metrics: QueryMetrics {
                latency_seconds: elapsed.as_secs_f64(),
                avg_latency_seconds: snapshot.avg_query_latency_seconds,
                total_queries: snapshot.total_queries,
            },
        })
    }

    async fn vector_count(&self) -> Result<usize> {
        self.index.count().await
    }

    fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// `[Source: name]` blocks separated by blank lines, in retrieval order
pub fn build_context(records: &[IndexRecord]) -> String {
    records
        .iter()
        .map(|record| format!("[Source: {}]\n{}", record.metadata.source, record.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First [`SNIPPET_CHARS`] characters, with an ellipsis when cut
pub fn snippet(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
