//! Probabilistic set membership via a Bloom filter.
//!
//! The bit array is packed into `u64` chunks and probed by `k` seeded
//! `FxHash` runs (the seed is the hash-function index, mixed in before the
//! item). Membership tests may report a false positive but never a false
//! negative: every bit an `add` sets stays set until [`BloomFilter::clear`].
//!
//! Sizing uses the standard formulas from an expected item count `n` and a
//! target false-positive rate `p`:
//!
//! ```text
//! m = -n * ln(p) / ln(2)^2      (bits, rounded up to whole u64 chunks)
//! k = (m / n) * ln(2)           (hash functions, at least 1)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use containerkit::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(100).unwrap();
//! filter.add("apple");
//!
//! assert!(filter.might_contain("apple")); // always true once added
//! // absent items are *usually* reported absent
//! ```

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::error::{BuildError, Result};

/// Default target false-positive rate for [`BloomFilter::new`].
const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// A fixed-size probabilistic set with no false negatives.
///
/// Accepts any `Hash` item type; a filter can even hold items of mixed
/// types, though in practice callers feed it one key type.
///
/// # Examples
///
/// ```rust
/// use containerkit::bloom::BloomFilter;
///
/// let mut seen = BloomFilter::new(1000).unwrap();
/// for id in 0u64..1000 {
///     seen.add(&id);
/// }
/// assert!(seen.might_contain(&42u64));
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilter {
    // Bit vector in 64-bit chunks
    bits: Vec<u64>,
    bit_count: usize,
    hash_count: usize,
    item_count: usize,
}

/// Occupancy counters reported by [`BloomFilter::statistics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomStatistics {
    /// Size of the bit array, `m`.
    pub bit_count: usize,
    /// Number of hash functions, `k`.
    pub hash_count: usize,
    /// Number of `add` calls since construction or the last clear.
    pub item_count: usize,
    /// Number of bits currently set.
    pub set_bits: usize,
    /// `set_bits / bit_count`.
    pub fill_ratio: f64,
    /// `fill_ratio ^ k`, the chance an absent item hits only set bits.
    pub estimated_false_positive_rate: f64,
}

impl BloomFilter {
    /// Create a filter sized for `expected_items` at a 1% target
    /// false-positive rate.
    ///
    /// Rejects a zero item count with [`BuildError::ZeroExpectedItems`].
    pub fn new(expected_items: usize) -> Result<Self> {
        Self::with_rate(expected_items, DEFAULT_FALSE_POSITIVE_RATE)
    }

    /// Create a filter sized for `expected_items` at a caller-chosen
    /// target false-positive rate in `(0, 1)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use containerkit::bloom::BloomFilter;
    ///
    /// let tight = BloomFilter::with_rate(100, 0.001).unwrap();
    /// let loose = BloomFilter::with_rate(100, 0.1).unwrap();
    /// assert!(tight.bit_count() > loose.bit_count());
    ///
    /// assert!(BloomFilter::with_rate(100, 0.0).is_err());
    /// assert!(BloomFilter::with_rate(100, 1.5).is_err());
    /// ```
    pub fn with_rate(expected_items: usize, false_positive_rate: f64) -> Result<Self> {
        if expected_items == 0 {
            return Err(BuildError::ZeroExpectedItems);
        }
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(BuildError::FalsePositiveRateOutOfRange(false_positive_rate));
        }

        let n = expected_items as f64;
        let ln2 = std::f64::consts::LN_2;
        let bits_needed = (-(n * false_positive_rate.ln()) / (ln2 * ln2)).ceil() as usize;
        let chunk_count = (bits_needed + 63) / 64; // Round up to nearest u64
        let bit_count = chunk_count * 64;
        let hash_count = ((bit_count as f64 / n) * ln2).round().max(1.0) as usize;

        Ok(BloomFilter {
            bits: vec![0u64; chunk_count],
            bit_count,
            hash_count,
            item_count: 0,
        })
    }

    /// Add an item to the set.
    pub fn add<T: Hash + ?Sized>(&mut self, item: &T) {
        for seed in 0..self.hash_count {
            let bit_index = self.bit_index(item, seed as u64);
            self.bits[bit_index / 64] |= 1u64 << (bit_index % 64);
        }
        self.item_count += 1;
    }

    /// Test whether an item might be in the set.
    ///
    /// Returns:
    /// - `false`: definitely NOT in the set
    /// - `true`: in the set, or a false positive
    #[inline]
    pub fn might_contain<T: Hash + ?Sized>(&self, item: &T) -> bool {
        for seed in 0..self.hash_count {
            let bit_index = self.bit_index(item, seed as u64);
            if self.bits[bit_index / 64] & (1u64 << (bit_index % 64)) == 0 {
                return false;
            }
        }
        true
    }

    /// Reset every bit and the item counter.
    ///
    /// The bit-array size and hash-function count are derived at
    /// construction and survive a clear.
    pub fn clear(&mut self) {
        self.bits.fill(0);
        self.item_count = 0;
    }

    /// Number of `add` calls since construction or the last clear.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Size of the bit array, `m`.
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Number of hash functions, `k`.
    #[inline]
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Report occupancy counters.
    pub fn statistics(&self) -> BloomStatistics {
        let set_bits: usize = self.bits.iter().map(|chunk| chunk.count_ones() as usize).sum();
        let fill_ratio = set_bits as f64 / self.bit_count as f64;

        BloomStatistics {
            bit_count: self.bit_count,
            hash_count: self.hash_count,
            item_count: self.item_count,
            set_bits,
            fill_ratio,
            estimated_false_positive_rate: fill_ratio.powi(self.hash_count as i32),
        }
    }

    /// Seeded FxHash probe for one hash function.
    #[inline]
    fn bit_index<T: Hash + ?Sized>(&self, item: &T, seed: u64) -> usize {
        let mut hasher = FxHasher::default();
        seed.hash(&mut hasher);
        item.hash(&mut hasher);
        (hasher.finish() % self.bit_count as u64) as usize
    }
}
