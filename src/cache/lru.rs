//! Bounded cache with strict least-recently-used eviction.
//!
//! The recency order is a doubly linked list whose nodes live in a flat
//! `Vec` and point at each other with `Option<usize>` indices rather than
//! references. The arena is filled once, up to `capacity` slots, and after
//! that slots are only ever overwritten in place: eviction reuses the
//! retired tail's slot for the incoming entry, so a warmed-up cache
//! allocates nothing per operation.

use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::types::config::{CacheConfig, MIN_CAPACITY};
use crate::types::errors::{MemoError, MemoResult};

use super::stats::CacheStats;

/// One position in the recency list.
///
/// `key` is the back-reference into the key map, needed to remove the right
/// map entry when this node is evicted from the tail.
#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Map payload: the cached value plus the arena slot of its node.
#[derive(Debug)]
struct Slot<V> {
    value: V,
    index: usize,
}

/// Fixed-capacity cache evicting the least-recently-used entry when full.
///
/// Lookup is O(1) through the key map; promotion and eviction are O(1)
/// through the index-linked list. Keys are cloned once per entry because
/// each key lives both in the map and in its list node.
///
/// Single-owner, single-threaded: callers sharing one instance across
/// threads must wrap it in their own mutex. There is no internal
/// synchronization and no suspension point inside any operation.
///
/// # Example
///
/// ```
/// use memolru::LruCache;
///
/// let mut cache = LruCache::new(10)?;
/// let value = *cache.get_or_compute(21, || 21 * 2);
/// assert_eq!(value, 42);
/// assert_eq!(cache.len(), 1);
/// # Ok::<(), memolru::MemoError>(())
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    map: HashMap<K, Slot<V>>,
    nodes: Vec<Node<K>>,
    len: usize,
    /// Most-recently-used slot. `None` exactly when the cache is empty.
    head: Option<usize>,
    /// Least-recently-used slot. `None` exactly when the cache is empty.
    tail: Option<usize>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Fails with [`MemoError::InvalidCapacity`] for capacities below 2,
    /// before any allocation happens.
    pub fn new(capacity: usize) -> MemoResult<Self> {
        if capacity < MIN_CAPACITY {
            return Err(MemoError::InvalidCapacity(capacity));
        }
        Ok(Self {
            map: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            len: 0,
            head: None,
            tail: None,
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        })
    }

    /// Creates a cache from a validated [`CacheConfig`].
    pub fn with_config(config: &CacheConfig) -> MemoResult<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    /// Looks up `key`, promoting it to most-recently-used on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let index = match self.map.get(key) {
            Some(slot) => slot.index,
            None => {
                self.misses += 1;
                trace!("cache miss");
                return None;
            }
        };
        self.hits += 1;
        trace!(slot = index, "cache hit");
        self.promote(index);
        self.map.get(key).map(|slot| &slot.value)
    }

    /// Returns the cached value for `key`, computing and inserting it on a
    /// miss. The entry is promoted to most-recently-used either way.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        match self.try_get_or_compute(key, || Ok::<V, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible twin of [`get_or_compute`](Self::get_or_compute).
    ///
    /// `compute` runs only on a miss, and it runs before the map or the
    /// list is touched: an `Err` propagates verbatim with no entry recorded
    /// and every invariant intact, so the next access retries the
    /// computation.
    pub fn try_get_or_compute<E>(
        &mut self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        let index = match self.map.get(&key) {
            Some(slot) => {
                let index = slot.index;
                self.hits += 1;
                trace!(slot = index, "cache hit");
                self.promote(index);
                index
            }
            None => {
                self.misses += 1;
                trace!("cache miss, invoking wrapped function");
                let value = compute()?;
                self.insert_new(key, value)
            }
        };
        let key = &self.nodes[index].key;
        Ok(&self.map[key].value)
    }

    /// Checks for `key` without touching the recency order or the counters.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Drops every entry and resets the statistics. The arena keeps its
    /// allocation so the cache refills without growing again.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing cache");
        self.map.clear();
        self.nodes.clear();
        self.len = 0;
        self.head = None;
        self.tail = None;
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.map.len(), self.len, "key map and entry count agree");
        self.len
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured maximum number of entries. `len()` never exceeds this.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len,
            capacity: Some(self.capacity),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    /// Moves the node at `index` to the head of the recency list.
    ///
    /// Three structural cases: the node is the tail (shorten the list by
    /// one from the back, then prepend), the node is interior (link its
    /// neighbors around it, then prepend), or the node is already the head
    /// (nothing moves). A singleton list needs no work at all.
    fn promote(&mut self, index: usize) {
        if self.len == 1 || self.head == Some(index) {
            return;
        }

        if self.tail == Some(index) {
            let new_tail = self.nodes[index]
                .prev
                .expect("tail of a multi-entry cache has a prev");
            self.tail = Some(new_tail);
            self.nodes[new_tail].next = None;
        } else {
            let prev = self.nodes[index].prev.expect("interior node has a prev");
            let next = self.nodes[index].next.expect("interior node has a next");
            self.nodes[prev].next = Some(next);
            self.nodes[next].prev = Some(prev);
        }

        let old_head = self.head.expect("multi-entry cache has a head");
        self.nodes[old_head].prev = Some(index);
        self.nodes[index].prev = None;
        self.nodes[index].next = Some(old_head);
        self.head = Some(index);
    }

    /// Inserts a freshly computed entry, evicting the tail if full.
    /// Returns the arena slot the new node landed in.
    fn insert_new(&mut self, key: K, value: V) -> usize {
        let index = if self.len == 0 {
            // First entry: one node that is both head and tail.
            self.nodes.push(Node {
                key: key.clone(),
                prev: None,
                next: None,
            });
            self.head = Some(0);
            self.tail = Some(0);
            self.len = 1;
            0
        } else if self.len < self.capacity {
            // Slots 0..len are in use, so `len` is the next free slot.
            let index = self.len;
            debug_assert_eq!(index, self.nodes.len(), "arena is dense");
            self.nodes.push(Node {
                key: key.clone(),
                prev: None,
                next: self.head,
            });
            let old_head = self.head.expect("non-empty cache has a head");
            self.nodes[old_head].prev = Some(index);
            self.head = Some(index);
            self.len += 1;
            index
        } else {
            self.evict_and_reuse(key.clone())
        };
        self.map.insert(key, Slot { value, index });
        index
    }

    /// Retires the least-recently-used entry and writes the new key into
    /// its slot, already linked in at the head. The arena does not grow.
    fn evict_and_reuse(&mut self, key: K) -> usize {
        debug_assert_eq!(self.len, self.capacity, "eviction only happens when full");
        let old_tail = self.tail.expect("full cache has a tail");
        let new_tail = self.nodes[old_tail]
            .prev
            .expect("capacity >= 2 leaves a node behind the tail");

        let evicted = self.map.remove(&self.nodes[old_tail].key);
        debug_assert!(evicted.is_some(), "tail key was present in the map");
        self.evictions += 1;
        debug!(slot = old_tail, "evicting least-recently-used entry");

        self.tail = Some(new_tail);
        self.nodes[new_tail].next = None;

        let old_head = self.head.expect("full cache has a head");
        self.nodes[old_head].prev = Some(old_tail);
        self.nodes[old_tail] = Node {
            key,
            prev: None,
            next: Some(old_head),
        };
        self.head = Some(old_tail);
        old_tail
    }
}

#[cfg(test)]
impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Walks the recency chain front to back, checking every structural
    /// invariant, and returns the keys in most-recently-used-first order.
    fn assert_consistent(&self) -> Vec<K> {
        assert_eq!(self.map.len(), self.len, "map size matches entry count");
        assert!(self.len <= self.capacity, "entry count within capacity");
        assert!(self.nodes.len() <= self.capacity, "arena never outgrows capacity");

        if self.len == 0 {
            assert!(self.head.is_none() && self.tail.is_none());
            return Vec::new();
        }

        let head = self.head.expect("non-empty cache has a head");
        let tail = self.tail.expect("non-empty cache has a tail");
        assert!(self.nodes[head].prev.is_none(), "head has no prev");
        assert!(self.nodes[tail].next.is_none(), "tail has no next");

        let mut order = Vec::new();
        let mut prev = None;
        let mut cursor = Some(head);
        while let Some(index) = cursor {
            assert!(order.len() < self.len, "recency chain is acyclic");
            assert_eq!(self.nodes[index].prev, prev, "prev link mirrors the walk");
            let slot = self
                .map
                .get(&self.nodes[index].key)
                .expect("node key is present in the map");
            assert_eq!(slot.index, index, "map entry points back at its node");
            order.push(self.nodes[index].key.clone());
            prev = Some(index);
            cursor = self.nodes[index].next;
        }
        assert_eq!(order.len(), self.len, "chain reaches every entry");
        assert_eq!(prev, Some(tail), "chain ends at the tail");
        order
    }
}
