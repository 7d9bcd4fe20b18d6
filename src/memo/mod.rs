//! Wrapped callables.
//!
//! The closest Rust gets to a memoizing decorator: a struct that owns both
//! the function and its result cache, so neither can be mutated behind the
//! other's back.
//!
//! - [`Memo`] - backed by [`UnboundedCache`](crate::UnboundedCache)
//! - [`LruMemo`] - backed by [`LruCache`](crate::LruCache)

mod lru;
mod unbounded;

pub use lru::LruMemo;
pub use unbounded::Memo;
