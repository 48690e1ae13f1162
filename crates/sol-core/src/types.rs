//! Common types used across the Solyntra system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a document when it is ingested
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of ingesting one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub doc_id: DocumentId,
    pub source: String,
    pub chunks: usize,
}

/// Point-in-time view of the process-wide counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_uploads: u64,
    pub total_queries: u64,
    pub total_query_seconds: f64,
    pub avg_query_latency_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_serializes_as_integer() {
        let value = serde_json::to_value(DocumentId(7)).unwrap();
        assert_eq!(value, serde_json::json!(7));
        assert_eq!(DocumentId(7).to_string(), "7");
    }
}
