//! # memolru
//!
//! Memoization for pure (or at least argument-deterministic) functions,
//! backed by either an unbounded map or a bounded, strictly-LRU cache.
//!
//! The bounded cache keeps its recency order in a doubly linked list whose
//! nodes are indices into a flat arena, so get, insert, and evict are all
//! O(1) with no per-operation allocation once warm.
//!
//! ## Modules
//!
//! - [`cache`] - the cache types themselves ([`LruCache`], [`UnboundedCache`])
//! - [`memo`] - function-plus-cache bundles ([`LruMemo`], [`Memo`])
//! - [`types`] - configuration and errors
//!
//! ## Example
//!
//! ```
//! use memolru::LruMemo;
//!
//! let mut double = LruMemo::new(10, |n: &u64| n * 2)?;
//! assert_eq!(double.call(21), 42);
//! assert_eq!(double.call(21), 42); // hit: the closure does not run again
//! assert_eq!(double.stats().hits, 1);
//! # Ok::<(), memolru::MemoError>(())
//! ```
//!
//! Caches are single-owner and single-threaded by design; to share one
//! across threads, put it behind your own `Mutex`.

pub mod cache;
pub mod memo;
pub mod types;

pub use cache::{CacheStats, LruCache, UnboundedCache};
pub use memo::{LruMemo, Memo};
pub use types::config::CacheConfig;
pub use types::errors::{MemoError, MemoResult};
