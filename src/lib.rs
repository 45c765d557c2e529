//! # containerkit
//!
//! Classic in-memory containers with explicit invariants: an ordered
//! prefix trie, a bounded LRU cache, a Bloom filter, a comparator-ordered
//! priority queue, and a toolkit of string-matching functions.
//!
//! Every structure is single-threaded and synchronous: operations are
//! plain calls that complete before returning, perform no I/O, and hold no
//! locks. Share an instance across threads only behind your own
//! synchronization. Construction validates its parameters up front;
//! runtime lookups return `Option` rather than failing.
//!
//! ## Example
//!
//! ```rust
//! use containerkit::prelude::*;
//!
//! // Autocomplete over file names
//! let mut paths = Trie::new();
//! paths.insert("src/lib.rs", 1);
//! paths.insert("src/lint.rs", 2);
//! assert_eq!(paths.suggestions("src/li", None).len(), 2);
//!
//! // Bound memory spent on retrieved file bytes
//! let mut bytes: LruCache<String, Vec<u8>> = LruCache::new(64).unwrap();
//! bytes.put("src/lib.rs".to_string(), vec![0u8; 16]);
//!
//! // Cheap pre-filter in front of an exact duplicate check
//! let mut seen = BloomFilter::new(1000).unwrap();
//! seen.add("src/lib.rs");
//! assert!(seen.might_contain("src/lib.rs"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bloom;
pub mod cache;
pub mod error;
pub mod factory;
pub mod heap;
pub mod matcher;
pub mod trie;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::bloom::{BloomFilter, BloomStatistics};
    pub use crate::cache::{CacheStatistics, LruCache};
    pub use crate::error::{BuildError, Result};
    pub use crate::factory::StructureFactory;
    pub use crate::heap::PriorityQueue;
    pub use crate::matcher;
    pub use crate::trie::{Trie, TrieStatistics};
}
