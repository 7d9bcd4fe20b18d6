//! Shared types: configuration and errors.

pub mod config;
pub mod errors;

pub use config::{CacheConfig, MIN_CAPACITY};
pub use errors::{MemoError, MemoResult};
