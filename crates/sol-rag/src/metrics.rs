//! Process-wide upload and query counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use sol_core::MetricsSnapshot;

/// Monotonic counters; never reset for the life of the process
#[derive(Debug, Default)]
pub struct Metrics {
    uploads: AtomicU64,
    queries: AtomicU64,
    query_nanos: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_upload(&self) {
        self.uploads.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a query and return the new total
    pub fn record_query(&self) -> u64 {
        self.queries.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Add a completed query's latency to the cumulative total
    pub fn record_latency(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.query_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_uploads = self.uploads.load(Ordering::Relaxed);
        let total_queries = self.queries.load(Ordering::Relaxed);
        let total_query_seconds =
            Duration::from_nanos(self.query_nanos.load(Ordering::Relaxed)).as_secs_f64();

        MetricsSnapshot {
            total_uploads,
            total_queries,
            total_query_seconds,
            avg_query_latency_seconds: average(total_query_seconds, total_queries),
        }
    }
}

/// Cumulative seconds over query count, zero before the first query
pub fn average(total_seconds: f64, queries: u64) -> f64 {
    if queries == 0 {
        0.0
    } else {
        total_seconds / queries as f64
    }
}
