//! Error types for container construction.
//!
//! Construction is the only fallible surface in this crate: invalid
//! parameters are rejected eagerly so no degenerate instance can exist.
//! Runtime lookups on any container return `Option` instead of failing.

use thiserror::Error;

/// Errors raised when constructing a container with invalid parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// The cache capacity was zero.
    ///
    /// A zero-capacity cache could never hold an entry, so every `put`
    /// would silently evict its own argument.
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,

    /// The Bloom filter expected-item count was zero.
    ///
    /// The bit-array and hash-function sizing formulas divide by the
    /// expected item count.
    #[error("expected item count must be at least 1")]
    ZeroExpectedItems,

    /// The Bloom filter target false-positive rate was outside `(0, 1)`.
    #[error("false positive rate must be within (0, 1), got {0}")]
    FalsePositiveRateOutOfRange(f64),
}

/// A specialized `Result` type for container construction.
pub type Result<T> = std::result::Result<T, BuildError>;
