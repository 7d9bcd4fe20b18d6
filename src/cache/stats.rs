//! Cache statistics.

use serde::Serialize;

/// Snapshot of a cache's counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Current number of entries.
    pub size: usize,

    /// Maximum capacity, or `None` for an unbounded cache.
    pub capacity: Option<usize>,

    /// Number of lookups answered from the cache.
    pub hits: u64,

    /// Number of lookups that missed.
    pub misses: u64,

    /// Number of entries evicted to make room. Always 0 for an unbounded
    /// cache.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache, 0.0 when none happened.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
