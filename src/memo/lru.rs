//! Callable wrapped with a bounded LRU cache.

use std::hash::Hash;

use crate::cache::{CacheStats, LruCache};
use crate::types::config::CacheConfig;
use crate::types::errors::MemoResult;

/// A function bundled with an [`LruCache`] over its results.
///
/// The function is treated as argument-deterministic: on a hit its body is
/// skipped entirely, side effects included. Multi-argument functions take a
/// tuple. The function receives its arguments by reference because the
/// cache keeps the key; the returned value is a clone of the cached one.
///
/// # Example
///
/// ```
/// use memolru::LruMemo;
///
/// let mut double = LruMemo::new(10, |n: &u64| n * 2)?;
/// assert_eq!(double.call(21), 42);
/// assert_eq!(double.call(21), 42); // cached, function not re-run
/// assert_eq!(double.len(), 1);
/// # Ok::<(), memolru::MemoError>(())
/// ```
pub struct LruMemo<K, V, F> {
    cache: LruCache<K, V>,
    func: F,
}

impl<K, V, F> LruMemo<K, V, F>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnMut(&K) -> V,
{
    /// Wraps `func` with a cache holding at most `capacity` results.
    pub fn new(capacity: usize, func: F) -> MemoResult<Self> {
        Ok(Self {
            cache: LruCache::new(capacity)?,
            func,
        })
    }

    /// Wraps `func` using a validated [`CacheConfig`].
    pub fn with_config(config: &CacheConfig, func: F) -> MemoResult<Self> {
        Ok(Self {
            cache: LruCache::with_config(config)?,
            func,
        })
    }

    /// Calls the wrapped function through the cache.
    pub fn call(&mut self, args: K) -> V {
        let func = &mut self.func;
        self.cache
            .get_or_compute(args.clone(), || func(&args))
            .clone()
    }

    /// Drops every cached result.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether no results are cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
