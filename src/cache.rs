//! Bounded key-value cache with least-recently-used eviction.
//!
//! Entries live in a slab (`Vec` of slots addressed by stable `usize`
//! handles, with a free list) and are threaded onto an intrusive doubly
//! linked list of slot indices ordered by recency. A `FxHashMap` maps keys
//! to slot handles. Promoting an entry to most-recently-used and evicting
//! the least-recently-used entry are both O(1) pointer (index) splices, and
//! the index-based list avoids ownership cycles entirely.
//!
//! # Examples
//!
//! ```rust
//! use containerkit::cache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b", the least recently used
//!
//! assert!(cache.contains_key(&"a"));
//! assert!(!cache.contains_key(&"b"));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{BuildError, Result};

#[derive(Debug, Clone)]
struct Slot<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A fixed-capacity cache evicting the least-recently-used entry.
///
/// `get` and `put` both mark the touched key as most-recently-used;
/// [`LruCache::peek`] and [`LruCache::contains_key`] observe without
/// affecting recency. Capacity is fixed at construction.
///
/// # Examples
///
/// ```rust
/// use containerkit::cache::LruCache;
///
/// let mut cache: LruCache<String, Vec<u8>> = LruCache::new(64).unwrap();
/// cache.put("etc/hosts".to_string(), vec![1, 2, 3]);
/// assert_eq!(cache.get(&"etc/hosts".to_string()), Some(&vec![1, 2, 3]));
/// assert_eq!(cache.hit_rate(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    index: FxHashMap<K, usize>,
    slots: Vec<Option<Slot<K, V>>>,
    free: Vec<usize>,
    /// Most-recently-used end of the recency list.
    head: Option<usize>,
    /// Least-recently-used end of the recency list.
    tail: Option<usize>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

/// Usage counters reported by [`LruCache::statistics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStatistics {
    /// Number of entries currently held.
    pub len: usize,
    /// Fixed capacity the cache was built with.
    pub capacity: usize,
    /// Lookups answered from the cache since the last clear.
    pub hit_count: u64,
    /// Lookups that found nothing since the last clear.
    pub miss_count: u64,
    /// `hit_count / (hit_count + miss_count)`, `0.0` before any lookup.
    pub hit_rate: f64,
    /// `len / capacity`.
    pub utilization: f64,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a cache bounded to `capacity` entries.
    ///
    /// Rejects a zero capacity with [`BuildError::ZeroCapacity`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        Ok(LruCache {
            index: FxHashMap::default(),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
            hits: 0,
            misses: 0,
        })
    }

    /// Insert or update an entry, returning the replaced value on update.
    ///
    /// Updating an existing key never evicts; it only refreshes the value
    /// and promotes the key to most-recently-used. Inserting into a full
    /// cache first evicts the least-recently-used entry.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot_idx) = self.index.get(&key) {
            self.detach(slot_idx);
            self.push_front(slot_idx);
            let slot = self.slots[slot_idx].as_mut()?;
            return Some(std::mem::replace(&mut slot.value, value));
        }

        if self.index.len() == self.capacity {
            self.evict_lru();
        }

        let slot_idx = self.alloc_slot(Slot {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, slot_idx);
        self.push_front(slot_idx);
        None
    }

    /// Look up a key, promoting it to most-recently-used on a hit.
    ///
    /// Counts a hit or a miss; use [`LruCache::peek`] to observe without
    /// side effects.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key).copied() {
            Some(slot_idx) => {
                self.hits += 1;
                self.detach(slot_idx);
                self.push_front(slot_idx);
                self.slots[slot_idx].as_ref().map(|slot| &slot.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up a key without touching recency or the hit/miss counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot_idx = *self.index.get(key)?;
        self.slots[slot_idx].as_ref().map(|slot| &slot.value)
    }

    /// Remove an entry, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot_idx = self.index.remove(key)?;
        self.detach(slot_idx);
        let slot = self.slots[slot_idx].take()?;
        self.free.push(slot_idx);
        Some(slot.value)
    }

    /// Check for a key without affecting recency or the counters.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of entries currently held. Never exceeds the capacity.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check whether the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The fixed capacity the cache was built with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the keys, most-recently-used first.
    pub fn keys(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(slot_idx) = cursor {
            match self.slots[slot_idx].as_ref() {
                Some(slot) => {
                    keys.push(slot.key.clone());
                    cursor = slot.next;
                }
                None => break,
            }
        }
        keys
    }

    /// Snapshot of the values, most-recently-used first.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries().into_iter().map(|(_, value)| value).collect()
    }

    /// Snapshot of `(key, value)` pairs, most-recently-used first.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        let mut entries = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(slot_idx) = cursor {
            match self.slots[slot_idx].as_ref() {
                Some(slot) => {
                    entries.push((slot.key.clone(), slot.value.clone()));
                    cursor = slot.next;
                }
                None => break,
            }
        }
        entries
    }

    /// Fraction of lookups answered from the cache.
    ///
    /// Defined as `0.0` when no lookup has happened yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Drop every entry and zero the hit/miss counters.
    ///
    /// The capacity is untouched; the cache ends up observably identical
    /// to a freshly-built one.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.hits = 0;
        self.misses = 0;
    }

    /// Report usage counters.
    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            len: self.len(),
            capacity: self.capacity,
            hit_count: self.hits,
            miss_count: self.misses,
            hit_rate: self.hit_rate(),
            utilization: self.len() as f64 / self.capacity as f64,
        }
    }

    /// Remove the least-recently-used entry, returning it.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let slot_idx = self.tail?;
        self.detach(slot_idx);
        let slot = self.slots[slot_idx].take()?;
        self.index.remove(&slot.key);
        self.free.push(slot_idx);
        Some((slot.key, slot.value))
    }

    /// Unlink a slot from the recency list.
    fn detach(&mut self, slot_idx: usize) {
        let (prev, next) = match self.slots[slot_idx].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(slot) = self.slots[prev_idx].as_mut() {
                    slot.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next_idx) => {
                if let Some(slot) = self.slots[next_idx].as_mut() {
                    slot.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(slot) = self.slots[slot_idx].as_mut() {
            slot.prev = None;
            slot.next = None;
        }
    }

    /// Link a detached slot in at the most-recently-used end.
    fn push_front(&mut self, slot_idx: usize) {
        let old_head = self.head;
        if let Some(slot) = self.slots[slot_idx].as_mut() {
            slot.prev = None;
            slot.next = old_head;
        }
        if let Some(head_idx) = old_head {
            if let Some(slot) = self.slots[head_idx].as_mut() {
                slot.prev = Some(slot_idx);
            }
        }
        self.head = Some(slot_idx);
        if self.tail.is_none() {
            self.tail = Some(slot_idx);
        }
    }

    fn alloc_slot(&mut self, slot: Slot<K, V>) -> usize {
        match self.free.pop() {
            Some(slot_idx) => {
                self.slots[slot_idx] = Some(slot);
                slot_idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_capacity() {
        let cache: Result<LruCache<String, i32>> = LruCache::new(0);
        assert_eq!(cache.unwrap_err(), BuildError::ZeroCapacity);
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_insert_beyond_capacity_evicts_lru() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("k1", 1);
        cache.put("k2", 2);
        cache.put("k3", 3);
        cache.put("k4", 4);

        assert!(!cache.contains_key(&"k1"));
        assert!(cache.contains_key(&"k2"));
        assert!(cache.contains_key(&"k3"));
        assert!(cache.contains_key(&"k4"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("k1", 1);
        cache.put("k2", 2);
        cache.put("k3", 3);

        // k1 becomes most-recently-used, so k2 is evicted instead
        cache.get(&"k1");
        cache.put("k4", 4);

        assert!(cache.contains_key(&"k1"));
        assert!(!cache.contains_key(&"k2"));
    }

    #[test]
    fn test_update_does_not_evict() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.put("a", 10), Some(1));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key(&"b"));

        // The update promoted "a", so "b" is now the eviction victim
        cache.put("c", 3);
        assert!(cache.contains_key(&"a"));
        assert!(!cache.contains_key(&"b"));
    }

    #[test]
    fn test_contains_key_does_not_touch_recency() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);

        assert!(cache.contains_key(&"a"));
        cache.put("c", 3);

        // contains_key did not promote "a"
        assert!(!cache.contains_key(&"a"));
        assert_eq!(cache.statistics().miss_count, 0);
    }

    #[test]
    fn test_peek_does_not_touch_recency_or_counters() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.peek(&"a"), Some(&1));
        assert_eq!(cache.peek(&"zzz"), None);
        cache.put("c", 3);

        assert!(!cache.contains_key(&"a"));
        assert_eq!(cache.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_half() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn test_hit_rate_without_accesses() {
        let cache: LruCache<&str, i32> = LruCache::new(3).unwrap();
        assert_eq!(cache.hit_rate(), 0.0);
    }

    #[test]
    fn test_remove() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);

        assert_eq!(cache.remove(&"a"), Some(1));
        assert_eq!(cache.remove(&"a"), None);
        assert!(cache.is_empty());

        // Removed slots are reusable without disturbing the list
        cache.put("b", 2);
        cache.put("c", 3);
        cache.put("d", 4);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key(&"b"));
    }

    #[test]
    fn test_keys_and_values_mru_first() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a");

        assert_eq!(cache.keys(), vec!["a", "c", "b"]);
        assert_eq!(cache.values(), vec![1, 3, 2]);
        assert_eq!(cache.entries()[0], ("a", 1));
    }

    #[test]
    fn test_clear_matches_fresh_instance() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"b");
        cache.clear();

        let fresh: LruCache<&str, i32> = LruCache::new(2).unwrap();
        assert_eq!(cache.statistics(), fresh.statistics());
        assert_eq!(cache.capacity(), 2);
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn test_statistics() {
        let mut cache = LruCache::new(4).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"zzz");

        let stats = cache.statistics();
        assert_eq!(stats.len, 2);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_rate, 0.5);
        assert_eq!(stats.utilization, 0.5);
    }

    #[test]
    fn test_capacity_one() {
        let mut cache = LruCache::new(1).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.len(), 1);
        assert!(!cache.contains_key(&"a"));
        assert_eq!(cache.get(&"b"), Some(&2));
    }
}
