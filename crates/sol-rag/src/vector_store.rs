//! Flat in-memory vector index

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use sol_core::{Error, IndexRecord, Result, SearchHit, VectorIndex};

/// Brute-force L2 index over an append-only list of records
pub struct FlatL2Index {
    dimension: usize,
    records: Arc<RwLock<Vec<IndexRecord>>>,
}

impl FlatL2Index {
    /// Create an empty index for vectors of `dimension` components
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Squared Euclidean distance
    fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum()
    }

    fn check_dimension(&self, len: usize, what: &str) -> Result<()> {
        if len != self.dimension {
            return Err(Error::VectorIndex(format!(
                "{} has dimension {}, index expects {}",
                what, len, self.dimension
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for FlatL2Index {
    async fn add(&self, records: Vec<IndexRecord>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        // Validate the whole batch before taking the write lock
        for (i, record) in records.iter().enumerate() {
            self.check_dimension(record.vector.len(), &format!("Record {}", i))?;
        }

        let mut stored = self
            .records
            .write()
            .map_err(|e| Error::VectorIndex(format!("Lock error: {}", e)))?;
        stored.extend(records);
        Ok(())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        let stored = self
            .records
            .read()
            .map_err(|e| Error::VectorIndex(format!("Lock error: {}", e)))?;

        if stored.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        self.check_dimension(query.len(), "Query")?;

        let mut hits: Vec<SearchHit> = stored
            .iter()
            .enumerate()
            .map(|(position, record)| SearchHit {
                position,
                distance: Self::squared_l2(query, &record.vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);

        Ok(hits)
    }

    async fn get(&self, position: usize) -> Result<Option<IndexRecord>> {
        let stored = self
            .records
            .read()
            .map_err(|e| Error::VectorIndex(format!("Lock error: {}", e)))?;
        Ok(stored.get(position).cloned())
    }

    async fn count(&self) -> Result<usize> {
        let stored = self
            .records
            .read()
            .map_err(|e| Error::VectorIndex(format!("Lock error: {}", e)))?;
        Ok(stored.len())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
