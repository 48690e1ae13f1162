//! Retrieval pipeline configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::{Error, Result};

/// Static, startup-time settings for chunking, search and caching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub embedding_dimension: usize,
    pub query_cache_capacity: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
            top_k: 5,
            embedding_dimension: 1536,
            query_cache_capacity: 128,
        }
    }
}

impl RagConfig {
    /// Create configuration from environment variables (and a `.env` file if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to the defaults; set keys must parse as positive integers.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            chunk_size: read_positive(&lookup, "CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: read_value(&lookup, "CHUNK_OVERLAP", defaults.chunk_overlap)?,
            top_k: read_positive(&lookup, "TOP_K", defaults.top_k)?,
            embedding_dimension: read_positive(
                &lookup,
                "EMBEDDING_DIM",
                defaults.embedding_dimension,
            )?,
            query_cache_capacity: read_positive(
                &lookup,
                "QUERY_CACHE_CAPACITY",
                defaults.query_cache_capacity,
            )?,
        };

        Ok(config)
    }
}

fn read_value<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            Error::Configuration(format!("{} must be a non-negative integer, got '{}'", key, raw))
        }),
        None => Ok(default),
    }
}

fn read_positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let value = read_value(lookup, key, default)?;
    if value == 0 {
        return Err(Error::Configuration(format!("{} must be greater than zero", key)));
    }
    Ok(value)
}
