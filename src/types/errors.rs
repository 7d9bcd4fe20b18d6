//! Error types for memolru.

use thiserror::Error;

/// Standard result type for memolru.
pub type MemoResult<T> = Result<T, MemoError>;

/// Errors produced by cache construction and configuration.
///
/// Failures of the wrapped callable are deliberately absent: the fallible
/// entry points are generic over the caller's own error type and pass it
/// through untouched, so the cache never owns or wraps those errors.
#[derive(Error, Debug)]
pub enum MemoError {
    #[error("invalid cache capacity {0}: an LRU cache requires capacity >= 2")]
    InvalidCapacity(usize),
}
