//! Configuration for memolru.

use serde::{Deserialize, Serialize};

use crate::types::errors::{MemoError, MemoResult};

/// Smallest accepted LRU capacity.
///
/// A single-entry list would make every node simultaneously head and tail,
/// and an empty list has neither; both degenerate shapes are rejected up
/// front instead of being special-cased in the relinking code.
pub const MIN_CAPACITY: usize = 2;

/// LRU cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cache capacity (number of entries). Must be at least 2.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl CacheConfig {
    /// Creates a configuration with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Checks the configuration, without allocating anything.
    pub fn validate(&self) -> MemoResult<()> {
        if self.capacity < MIN_CAPACITY {
            return Err(MemoError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    1000
}
