//! Validated construction for every container in the crate.
//!
//! The factory is a thin front door: parameter validation lives in each
//! container's own constructor, and the factory simply routes to it so
//! callers wiring up several structures can build them all from one place.
//! There is no shared state behind it.
//!
//! # Example
//!
//! ```rust
//! use containerkit::factory::StructureFactory;
//!
//! let mut cache = StructureFactory::lru_cache::<String, u64>(128).unwrap();
//! let mut filter = StructureFactory::bloom_filter(1000).unwrap();
//!
//! cache.put("total".to_string(), 7);
//! filter.add("total");
//!
//! assert!(StructureFactory::lru_cache::<String, u64>(0).is_err());
//! ```

use std::cmp::Ordering;
use std::hash::Hash;

use crate::bloom::BloomFilter;
use crate::cache::LruCache;
use crate::error::Result;
use crate::heap::PriorityQueue;
use crate::trie::Trie;

/// Factory for constructing containers with validated parameters.
pub struct StructureFactory;

impl StructureFactory {
    /// Create an empty prefix trie.
    pub fn trie<V>() -> Trie<V> {
        Trie::new()
    }

    /// Create an LRU cache bounded to `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BuildError::ZeroCapacity`] when `capacity`
    /// is zero.
    pub fn lru_cache<K: Eq + Hash + Clone, V>(capacity: usize) -> Result<LruCache<K, V>> {
        LruCache::new(capacity)
    }

    /// Create a Bloom filter sized for `expected_items` at the default
    /// false-positive rate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BuildError::ZeroExpectedItems`] when
    /// `expected_items` is zero.
    pub fn bloom_filter(expected_items: usize) -> Result<BloomFilter> {
        BloomFilter::new(expected_items)
    }

    /// Create a Bloom filter with a caller-chosen target false-positive
    /// rate in `(0, 1)`.
    pub fn bloom_filter_with_rate(
        expected_items: usize,
        false_positive_rate: f64,
    ) -> Result<BloomFilter> {
        BloomFilter::with_rate(expected_items, false_positive_rate)
    }

    /// Create a priority queue ordered by `compare`.
    pub fn priority_queue<T, F>(compare: F) -> PriorityQueue<T>
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        PriorityQueue::new(compare)
    }

    /// Create a priority queue popping the smallest item first.
    pub fn min_heap<T: Ord + 'static>() -> PriorityQueue<T> {
        PriorityQueue::min_heap()
    }

    /// Create a priority queue popping the largest item first.
    pub fn max_heap<T: Ord + 'static>() -> PriorityQueue<T> {
        PriorityQueue::max_heap()
    }
}
