//! Callable wrapped with an unbounded cache.

use std::hash::Hash;

use crate::cache::{CacheStats, UnboundedCache};

/// A function bundled with an [`UnboundedCache`] over its results.
///
/// Every distinct argument ever passed stays cached; bounding the footprint
/// is [`LruMemo`](crate::LruMemo)'s job.
///
/// Self-recursive functions cannot call back through the wrapper that owns
/// them; thread a cache through the recursion explicitly instead:
///
/// ```
/// use memolru::UnboundedCache;
///
/// fn fib(cache: &mut UnboundedCache<u64, u64>, n: u64) -> u64 {
///     if n < 2 {
///         return n;
///     }
///     if let Some(&value) = cache.get(&n) {
///         return value;
///     }
///     let value = fib(cache, n - 1) + fib(cache, n - 2);
///     *cache.get_or_compute(n, || value)
/// }
///
/// let mut cache = UnboundedCache::new();
/// assert_eq!(fib(&mut cache, 50), 12_586_269_025);
/// assert_eq!(cache.len(), 49);
/// ```
pub struct Memo<K, V, F> {
    cache: UnboundedCache<K, V>,
    func: F,
}

impl<K, V, F> Memo<K, V, F>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnMut(&K) -> V,
{
    /// Wraps `func` with an empty cache.
    pub fn new(func: F) -> Self {
        Self {
            cache: UnboundedCache::new(),
            func,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_caches_result() {
        let mut calls = 0u32;
        let mut triple = Memo::new(|n: &u32| {
            calls += 1;
            n * 3
        });

        assert_eq!(triple.call(5), 15);
        assert_eq!(triple.call(5), 15);
        assert_eq!(triple.len(), 1);
        drop(triple);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_distinct_arguments_accumulate() {
        let mut id = Memo::new(|s: &String| s.clone());
        for i in 0..20 {
            id.call(format!("key-{i}"));
        }
        assert_eq!(id.len(), 20);
        assert_eq!(id.stats().capacity, None);
    }
}
