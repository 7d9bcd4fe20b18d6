//! Integration tests for the memolru cache types.

use std::cell::Cell;
use std::collections::VecDeque;

use proptest::prelude::*;

use memolru::{CacheConfig, LruCache, MemoError};

/// Installs a test-writer subscriber so the cache's trace/debug events are
/// visible under `cargo test`. Safe to call from every test; only the first
/// call wins.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn double_cache(capacity: usize) -> LruCache<u32, u32> {
    init_tracing();
    LruCache::new(capacity).expect("valid capacity")
}

// Construction and configuration
mod construction_tests {
    use super::*;

    #[test]
    fn test_capacity_zero_rejected() {
        let result = LruCache::<u32, u32>::new(0);
        assert!(matches!(result, Err(MemoError::InvalidCapacity(0))));
    }

    #[test]
    fn test_capacity_one_rejected() {
        let result = LruCache::<u32, u32>::new(1);
        assert!(matches!(result, Err(MemoError::InvalidCapacity(1))));
    }

    #[test]
    fn test_error_message_names_the_capacity() {
        let err = LruCache::<u32, u32>::new(1).expect_err("capacity 1 must fail");
        assert!(err.to_string().contains("capacity 1"));
    }

    #[test]
    fn test_minimum_viable_capacity() {
        let mut cache = double_cache(2);
        cache.get_or_compute(1, || 2);
        cache.get_or_compute(2, || 4);
        cache.get_or_compute(3, || 6); // evicts 1
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2) && cache.contains(&3));
    }

    #[test]
    fn test_config_validation() {
        assert!(LruCache::<u32, u32>::with_config(&CacheConfig::new(0)).is_err());
        let cache =
            LruCache::<u32, u32>::with_config(&CacheConfig::new(16)).expect("valid config");
        assert_eq!(cache.capacity(), 16);
    }
}

// LRU ordering and eviction through the public surface
mod lru_behavior_tests {
    use super::*;

    #[test]
    fn test_repeated_access_keeps_size_at_distinct_keys() {
        // double(n) = 2n, accesses 0,0,1,2,1,0 -> three distinct keys
        let mut cache = double_cache(10);
        let calls = Cell::new(0u32);
        for key in [0u32, 0, 1, 2, 1, 0] {
            let value = *cache.get_or_compute(key, || {
                calls.set(calls.get() + 1);
                key * 2
            });
            assert_eq!(value, key * 2);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_oldest_keys_fall_out_in_insertion_order() {
        // 14 distinct keys into capacity 10: 0..3 go, 4..13 stay
        let mut cache = double_cache(10);
        for key in 0u32..14 {
            cache.get_or_compute(key, || key * 2);
        }
        assert_eq!(cache.len(), 10);
        for key in 0u32..4 {
            assert!(!cache.contains(&key), "key {key} should be evicted");
        }
        for key in 4u32..14 {
            assert!(cache.contains(&key), "key {key} should survive");
        }
    }

    #[test]
    fn test_promotion_protects_a_key_from_eviction() {
        // Fill exactly, touch the oldest key, then overflow by one.
        let mut cache = double_cache(10);
        for key in 0u32..10 {
            cache.get_or_compute(key, || key * 2);
        }
        assert_eq!(cache.get(&0), Some(&0));
        cache.get_or_compute(10, || 20);
        assert!(cache.contains(&0), "promoted key survives");
        assert!(!cache.contains(&1), "key 1 became least recently used");
    }

    #[test]
    fn test_promotion_is_idempotent() {
        let mut cache = double_cache(3);
        for key in [1u32, 2, 3] {
            cache.get_or_compute(key, || key * 2);
        }
        // Hammering the most-recently-used key changes nothing.
        for _ in 0..5 {
            assert_eq!(cache.get(&3), Some(&6));
        }
        cache.get_or_compute(4, || 8);
        assert!(!cache.contains(&1), "eviction order was unaffected");
        assert!(cache.contains(&2));
    }

    #[test]
    fn test_reaccessed_window_evicts_oldest_first() {
        // Insert 0..7 into capacity 4 (3,4,5,6 survive), re-touch the
        // survivors oldest-first, then overflow twice.
        let mut cache = double_cache(4);
        for key in 0u32..7 {
            cache.get_or_compute(key, || key * 2);
        }
        for key in 3u32..7 {
            assert!(cache.get(&key).is_some());
        }
        cache.get_or_compute(7, || 14);
        assert!(!cache.contains(&3));
        cache.get_or_compute(8, || 16);
        assert!(!cache.contains(&4));
        assert!(cache.contains(&5) && cache.contains(&6));
    }

    #[test]
    fn test_scattered_access_pattern_saturates_at_capacity() {
        // 14 possible keys cycling through a capacity-10 cache
        let mut cache = double_cache(10);
        for z in 0u32..100 {
            let key = (19 * z + 3) % 14;
            assert_eq!(*cache.get_or_compute(key, || key * 2), key * 2);
            assert!(cache.len() <= 10);
        }
        assert_eq!(cache.len(), 10);
    }
}

mod clear_tests {
    use super::*;

    #[test]
    fn test_clear_makes_every_key_a_miss_again() {
        let mut cache = double_cache(10);
        let calls = Cell::new(0u32);
        let mut compute = |key: u32| {
            *cache.get_or_compute(key, || {
                calls.set(calls.get() + 1);
                key * 2
            })
        };
        compute(5);
        compute(5);
        assert_eq!(calls.get(), 1);

        cache.clear();
        assert_eq!(cache.len(), 0);

        let value = *cache.get_or_compute(5, || {
            calls.set(calls.get() + 1);
            10
        });
        assert_eq!(value, 10);
        assert_eq!(calls.get(), 2, "cleared key is recomputed");
    }

    #[test]
    fn test_cache_refills_after_clear() {
        let mut cache = double_cache(3);
        for key in 0u32..5 {
            cache.get_or_compute(key, || key * 2);
        }
        cache.clear();
        for key in 10u32..16 {
            cache.get_or_compute(key, || key * 2);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(&15));
    }
}

mod error_propagation_tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct ComputeFailed(&'static str);

    #[test]
    fn test_failed_computation_is_not_cached() {
        let mut cache: LruCache<u32, u32> = double_cache(10);
        let calls = Cell::new(0u32);

        let result = cache.try_get_or_compute(7, || {
            calls.set(calls.get() + 1);
            Err(ComputeFailed("transient"))
        });
        assert_eq!(result, Err(ComputeFailed("transient")));
        assert_eq!(cache.len(), 0);

        // Retry reaches the callable again and the success is cached.
        let result: Result<&u32, ComputeFailed> = cache.try_get_or_compute(7, || {
            calls.set(calls.get() + 1);
            Ok(14)
        });
        assert_eq!(result, Ok(&14));
        assert_eq!(calls.get(), 2);

        let result: Result<&u32, ComputeFailed> =
            cache.try_get_or_compute(7, || Err(ComputeFailed("never reached")));
        assert_eq!(result, Ok(&14));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_failure_does_not_disturb_existing_entries() {
        let mut cache = double_cache(3);
        for key in [1u32, 2, 3] {
            cache.get_or_compute(key, || key * 2);
        }
        let result: Result<&u32, ()> = cache.try_get_or_compute(4, || Err(()));
        assert!(result.is_err());
        assert_eq!(cache.len(), 3);
        for key in [1u32, 2, 3] {
            assert!(cache.contains(&key));
        }
    }
}

// Model-based check: the cache must agree with a naive ordered reference
// for arbitrary access sequences.
#[derive(Debug, Clone)]
enum Op {
    Access(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        9 => (0u8..24).prop_map(Op::Access),
        1 => Just(Op::Clear),
    ]
}

struct ReferenceLru {
    capacity: usize,
    /// Keys in most-recently-used-first order.
    order: VecDeque<u8>,
}

impl ReferenceLru {
    /// Returns whether the access was a hit.
    fn access(&mut self, key: u8) -> bool {
        if let Some(pos) = self.order.iter().position(|&k| k == key) {
            self.order.remove(pos);
            self.order.push_front(key);
            true
        } else {
            self.order.push_front(key);
            if self.order.len() > self.capacity {
                self.order.pop_back();
            }
            false
        }
    }
}

proptest! {
    #[test]
    fn test_cache_matches_reference_model(
        capacity in 2usize..9,
        ops in prop::collection::vec(op_strategy(), 0..300),
    ) {
        init_tracing();
        let mut cache: LruCache<u8, u32> = LruCache::new(capacity).expect("valid capacity");
        let mut model = ReferenceLru {
            capacity,
            order: VecDeque::new(),
        };

        for op in ops {
            match op {
                Op::Access(key) => {
                    let computed = Cell::new(false);
                    let value = *cache.get_or_compute(key, || {
                        computed.set(true);
                        u32::from(key) * 2
                    });
                    let hit = model.access(key);
                    prop_assert_eq!(computed.get(), !hit, "hit/miss agrees with the model");
                    prop_assert_eq!(value, u32::from(key) * 2);
                }
                Op::Clear => {
                    cache.clear();
                    model.order.clear();
                }
            }

            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), model.order.len());
            for key in &model.order {
                prop_assert!(cache.contains(key), "model key {} present", key);
            }
        }
    }
}
