//! Vector index trait and record types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::DocumentId;
use crate::{Embedding, Result};

/// Where a chunk came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub doc_id: DocumentId,
    pub chunk_index: usize,
    pub source: String,
}

/// One stored chunk: its vector, its text and its metadata, kept together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub vector: Embedding,
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Position of a stored record and its squared L2 distance to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub position: usize,
    pub distance: f32,
}

/// Trait for vector indexes
///
/// Records are append-only; the position of a record never changes once added.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Append records in order. Either every record is stored or none is.
    async fn add(&self, records: Vec<IndexRecord>) -> Result<()>;

    /// Up to `k` nearest records, nearest first, ties broken by insertion order
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>>;

    /// Record stored at `position`, if any
    async fn get(&self, position: usize) -> Result<Option<IndexRecord>>;

    /// Total number of stored vectors
    async fn count(&self) -> Result<usize>;

    /// Dimensionality every stored vector must have
    fn dimension(&self) -> usize;
}
