//! Error types for the sievekit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by fallible constructors when the requested
//!   configuration cannot produce a working cache (e.g. zero capacity).
//! - [`InvariantError`]: Returned by the debug-only `check_invariants`
//!   validator when the cache's internal bookkeeping has diverged.
//!
//! ## Example Usage
//!
//! ```
//! use sievekit::error::ConfigError;
//! use sievekit::policy::sieve::SieveCache;
//!
//! let cache: Result<SieveCache<String, i32>, ConfigError> = SieveCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is rejected without panicking
//! let bad = SieveCache::<String, i32>::try_new(0);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidCapacity { capacity: 0 });
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`SieveCache::try_new`](crate::policy::sieve::SieveCache::try_new)
/// and [`SieveCache::try_with_config`](crate::policy::sieve::SieveCache::try_with_config).
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve::SieveCache;
///
/// let err = SieveCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested capacity cannot hold a single entry.
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacity { capacity } => write!(
                f,
                "cache capacity must be greater than zero, got {}",
                capacity
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`SieveCache::check_invariants`](crate::policy::sieve::SieveCache::check_invariants)
/// in debug builds. Carries a human-readable description of which invariant
/// failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
