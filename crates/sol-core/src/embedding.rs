//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// A fixed-length vector produced by an embedding model
pub type Embedding = Vec<f32>;

/// Trait for embedding providers (e.g., OpenAI, a local model server)
///
/// Implementations perform exactly one outbound request per call and never retry.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Whether a credential is available; checked before any request is made
    fn is_configured(&self) -> bool;

    /// Get the embedding model ID being used
    fn model_id(&self) -> &str;
}
