//! Memoization caches.
//!
//! Two flavors share one surface:
//!
//! - [`LruCache`] - fixed capacity, strict least-recently-used eviction,
//!   O(1) lookup/promotion/eviction over an index-linked arena
//! - [`UnboundedCache`] - plain map, never evicts
//!
//! Both report their counters through [`CacheStats`].

mod lru;
mod stats;
mod unbounded;

pub use lru::LruCache;
pub use stats::CacheStats;
pub use unbounded::UnboundedCache;
