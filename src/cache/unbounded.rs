//! Unbounded memoization cache.
//!
//! The degenerate baseline: a plain map that grows without limit and never
//! evicts. Useful when the key space is known to be small, or as the
//! backing store for recursive memoized functions where every intermediate
//! result stays hot.

use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;

use tracing::{debug, trace};

use super::stats::CacheStats;

/// Cache that keeps every entry ever computed.
///
/// Growth is the caller's responsibility; for a bounded footprint use
/// [`LruCache`](crate::LruCache) instead.
///
/// # Example
///
/// ```
/// use memolru::UnboundedCache;
///
/// let mut cache = UnboundedCache::new();
/// assert_eq!(*cache.get_or_compute(3, || 3 * 3), 9);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct UnboundedCache<K, V> {
    map: HashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for UnboundedCache<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> UnboundedCache<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up `key`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(value) => {
                self.hits += 1;
                trace!("cache hit");
                Some(value)
            }
            None => {
                self.misses += 1;
                trace!("cache miss");
                None
            }
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a
    /// miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        match self.try_get_or_compute(key, || Ok::<V, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible twin of [`get_or_compute`](Self::get_or_compute): an `Err`
    /// from `compute` propagates verbatim and nothing is stored.
    pub fn try_get_or_compute<E>(
        &mut self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        if self.map.contains_key(&key) {
            self.hits += 1;
            trace!("cache hit");
            return Ok(&self.map[&key]);
        }
        self.misses += 1;
        trace!("cache miss, invoking wrapped function");
        // compute runs before the map changes, so an Err stores nothing.
        let value = compute()?;
        Ok(self.map.entry(key).or_insert(value))
    }

    /// Checks for `key` without touching the counters.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Drops every entry and resets the statistics.
    pub fn clear(&mut self) {
        debug!(len = self.map.len(), "clearing cache");
        self.map.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.map.len(),
            capacity: None,
            hits: self.hits,
            misses: self.misses,
            evictions: 0,
        }
    }
}
