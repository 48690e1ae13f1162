//! Embedding adapter with a query cache

use std::sync::{Arc, Mutex};
use tracing::debug;

use sol_core::{Embedding, EmbeddingProvider, Error, Result};

use crate::cache::LruCache;

/// Wraps an [`EmbeddingProvider`], validating its output and caching query vectors.
///
/// The cache is keyed by the exact query string and is never invalidated.
pub struct EmbeddingClient {
    provider: Arc<dyn EmbeddingProvider>,
    dimension: usize,
    query_cache: Mutex<LruCache<String, Embedding>>,
}

impl EmbeddingClient {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, dimension: usize, cache_capacity: usize) -> Self {
        Self {
            provider,
            dimension,
            query_cache: Mutex::new(LruCache::new(cache_capacity)),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed a batch of texts, one vector per input, in order
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if !self.provider.is_configured() {
            return Err(Error::Configuration(
                "Embedding provider has no API key configured".to_string(),
            ));
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self.provider.embed_batch(texts).await?;

        if vectors.len() != texts.len() {
            return Err(Error::Provider(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimension) {
            return Err(Error::Provider(format!(
                "Embedding has dimension {}, expected {}",
                bad.len(),
                self.dimension
            )));
        }

        debug!(
            model = self.provider.model_id(),
            count = vectors.len(),
            "Embedded batch"
        );
        Ok(vectors)
    }

    /// Embed a single query, served from the cache when possible
    pub async fn embed_query(&self, query: &str) -> Result<Embedding> {
        if let Some(hit) = self.cached(query)? {
            debug!("Query embedding cache hit");
            return Ok(hit);
        }

        let vector = self
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider("Provider returned no embedding".to_string()))?;

        let mut cache = self
            .query_cache
            .lock()
            .map_err(|e| Error::Other(format!("Lock error: {}", e)))?;
        cache.put(query.to_string(), vector.clone());

        Ok(vector)
    }

    /// Number of cached query vectors
    pub fn cached_queries(&self) -> usize {
        self.query_cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    fn cached(&self, query: &str) -> Result<Option<Embedding>> {
        let mut cache = self
            .query_cache
            .lock()
            .map_err(|e| Error::Other(format!("Lock error: {}", e)))?;
        Ok(cache.get(&query.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        configured: bool,
        dimension: usize,
        extra: bool,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(dimension: usize) -> Self {
            Self {
                configured: true,
                dimension,
                extra: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for StubProvider {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut out: Vec<Embedding> = texts
                .iter()
                .map(|t| vec![t.len() as f32; self.dimension])
                .collect();
            if self.extra {
                out.push(vec![0.0; self.dimension]);
            }
            Ok(out)
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        fn model_id(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn test_embed_preserves_order() {
        let provider = Arc::new(StubProvider::new(2));
        let client = EmbeddingClient::new(provider, 2, 4);

        let vectors = client
            .embed(&["a".to_string(), "abc".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors, vec![vec![1.0, 1.0], vec![3.0, 3.0]]);
    }

    #[tokio::test]
    async fn test_unconfigured_fails_without_calling_provider() {
        let provider = Arc::new(StubProvider {
            configured: false,
            ..StubProvider::new(2)
        });
        let client = EmbeddingClient::new(provider.clone(), 2, 4);

        let err = client.embed(&["x".to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_provider_error() {
        let provider = Arc::new(StubProvider::new(3));
        let client = EmbeddingClient::new(provider, 2, 4);

        let err = client.embed(&["x".to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[tokio::test]
    async fn test_count_mismatch_is_provider_error() {
        let provider = Arc::new(StubProvider {
            extra: true,
            ..StubProvider::new(2)
        });
        let client = EmbeddingClient::new(provider, 2, 4);

        let err = client.embed(&["x".to_string()]).await.unwrap_err();
        assert!(err.to_string().contains("Expected 1 embeddings, got 2"));
    }

    #[tokio::test]
    async fn test_query_cache_hits_skip_provider() {
        let provider = Arc::new(StubProvider::new(2));
        let client = EmbeddingClient::new(provider.clone(), 2, 4);

        let first = client.embed_query("what is rust").await.unwrap();
        let second = client.embed_query("what is rust").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.cached_queries(), 1);

        // Keys are exact strings
        client.embed_query("what is rust ").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_query_cache_is_bounded() {
        let provider = Arc::new(StubProvider::new(1));
        let client = EmbeddingClient::new(provider.clone(), 1, 2);

        for query in ["a", "b", "c"] {
            client.embed_query(query).await.unwrap();
        }
        assert_eq!(client.cached_queries(), 2);

        // "a" was evicted
        client.embed_query("a").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }
}
