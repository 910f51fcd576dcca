//! # Cache Trait Hierarchy
//!
//! Defines the interface the SIEVE cache exposes to generic code, split by
//! what an operation is allowed to touch.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │          ReadOnlyCache<K, V>            │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&mut, &K) → Option<V>           │
//!   │  remove_batch(&mut, &[K])               │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `ReadOnlyCache` methods never affect eviction order, so they can be called
//! through a shared reference. `CoreCache::get` may record the access
//! (SIEVE sets the entry's visited bit).
//!
//! ## Thread Safety
//!
//! Cache implementations are **not** internally synchronized. Wrap them in a
//! lock (e.g. `Arc<Mutex<C>>`) for shared access.

/// Operations that inspect a cache without affecting eviction order.
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve::SieveCache;
/// use sievekit::traits::{CoreCache, ReadOnlyCache};
///
/// fn occupancy<C: ReadOnlyCache<u64, String>>(cache: &C) -> f64 {
///     cache.len() as f64 / cache.capacity() as f64
/// }
///
/// let mut cache = SieveCache::new(4);
/// cache.insert(1, "one".to_string());
/// assert_eq!(occupancy(&cache), 0.25);
/// ```
pub trait ReadOnlyCache<K, V> {
    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache holds.
    fn capacity(&self) -> usize;
}

/// Core cache operations.
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve::SieveCache;
/// use sievekit::traits::{CoreCache, ReadOnlyCache};
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = SieveCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to the
    /// cache's eviction policy before the new entry is inserted.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction state. Use
    /// [`contains`](ReadOnlyCache::contains) to check existence without
    /// affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve::SieveCache;
/// use sievekit::traits::{CoreCache, MutableCache, ReadOnlyCache};
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = SieveCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Configuration for cache creation.
///
/// # Fields
///
/// | Field | Type | Default | Description |
/// |-------|------|---------|-------------|
/// | `capacity` | `usize` | 1000 | Maximum number of entries |
/// | `prealloc_memory` | `bool` | true | Size entry storage and index for `capacity` up front |
///
/// # Example
///
/// ```
/// use sievekit::traits::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert_eq!(config.capacity, 1000);
/// assert!(config.prealloc_memory);
///
/// let config = CacheConfig {
///     capacity: 64,
///     ..Default::default()
/// };
/// assert_eq!(config.capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold. Must be non-zero.
    pub capacity: usize,

    /// Pre-allocate memory for the full capacity.
    ///
    /// When true, no allocation happens on the insert path once the cache is
    /// built. When false, storage grows as entries arrive.
    pub prealloc_memory: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc_memory: true,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration for `capacity` entries with default options.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }
}
