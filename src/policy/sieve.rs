//! SIEVE cache replacement policy.
//!
//! Implements SIEVE: one "visited" bit per entry plus a persistent scan
//! pointer (the "hand") that sweeps an insertion-ordered list to choose
//! eviction victims. Hits never reorder anything; only eviction walks the
//! list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         SieveCache<K, V> Layout                             │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  index: FxHashMap<K, SlotId>     (key -> list node)                 │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  list: IntrusiveList<Entry<K, V>>   (insertion order)               │   │
//! │   │                                                                     │   │
//! │   │   front (newest)                                      back (oldest) │   │
//! │   │     ┌───┐     ┌───┐     ┌───┐     ┌───┐     ┌───┐                   │   │
//! │   │     │ E │ ◄─► │ D │ ◄─► │ C │ ◄─► │ B │ ◄─► │ A │                   │   │
//! │   │     │   │     │ v │     │   │     │ v │     │   │                   │   │
//! │   │     └───┘     └───┘     └───┘     └───┘     └───┘                   │   │
//! │   │                           ▲                                         │   │
//! │   │                           │                                         │   │
//! │   │                  hand: Option<SlotId>                               │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   On access: set visited bit (no list operations)                           │
//! │   On eviction: sweep from hand toward front, clear bits, evict first clean  │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! GET(key):
//!   1. Look up node in index
//!   2. Set visited = true
//!   3. Return value
//!
//! INSERT(key, value):
//!   1. If key exists: replace value, set visited = true, done (no reorder)
//!   2. If len == capacity: EVICT()
//!   3. Push new entry at the front, register it in the index
//!
//! EVICT():
//!   node = hand, or the back (oldest) node if hand is unset
//!   while node.visited:
//!     node.visited = false            // second chance
//!     node = node.prev, or the back node if node was the front
//!   hand = node.prev                  // None if node was the front
//!   unlink node, drop it from the index
//! ```
//!
//! The hand persists between evictions. Restarting every sweep at the back
//! would give a different (and more expensive) eviction order.
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time    | Notes                                   |
//! |------------|---------|-----------------------------------------|
//! | `get`      | O(1)    | Hash lookup + bit set                   |
//! | `peek`     | O(1)    | Hash lookup only                        |
//! | `insert`   | O(1)*   | *Amortized, eviction may sweep          |
//! | `contains` | O(1)    | Hash lookup only                        |
//! | `remove`   | O(1)    | Hash lookup + unlink                    |
//!
//! An eviction visits at most `2 * len` nodes: one pass can clear every
//! visited bit, and the next node reached after that is clean.
//!
//! ## Example Usage
//!
//! ```
//! use sievekit::policy::sieve::SieveCache;
//!
//! let mut cache = SieveCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//!
//! // Nothing visited: the oldest entry goes first.
//! cache.insert("c", 3);
//! assert!(!cache.contains(&"a"));
//!
//! // "b" is visited, so the sweep spares it and takes "c".
//! assert_eq!(cache.get(&"b"), Some(&2));
//! cache.insert("a", 1);
//! assert!(cache.contains(&"b"));
//! assert!(!cache.contains(&"c"));
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveListIter;
use crate::ds::{IntrusiveList, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheConfig, CoreCache, MutableCache, ReadOnlyCache};

/// Capacity used by [`Default`].
const DEFAULT_CAPACITY: usize = 128;

struct Entry<K, V> {
    key: K,
    value: V,
    visited: bool,
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over cache entries, newest first.
pub struct Iter<'a, K, V> {
    inner: IntrusiveListIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> std::iter::FusedIterator for Iter<'_, K, V> {}

impl<K, V> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Iterator over cache keys, newest first.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> std::iter::FusedIterator for Keys<'_, K, V> {}

/// Iterator over cache values, newest first.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> std::iter::FusedIterator for Values<'_, K, V> {}

/// Consuming iterator over cache entries, newest first.
pub struct IntoIter<K, V> {
    list: IntrusiveList<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().map(|entry| (entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> std::iter::FusedIterator for IntoIter<K, V> {}

// ---------------------------------------------------------------------------
// SieveCache
// ---------------------------------------------------------------------------

/// Fixed-capacity cache with SIEVE eviction.
///
/// Entries live in an arena-backed [`IntrusiveList`] ordered by insertion
/// (front = newest). The hand is a [`SlotId`] into that list rather than a
/// reference, and is re-homed in the same step that unlinks the node it
/// points at.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve::SieveCache;
///
/// let mut cache = SieveCache::new(100);
///
/// cache.insert("key1", "value1");
/// cache.insert("key2", "value2");
///
/// assert_eq!(cache.get(&"key1"), Some(&"value1"));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct SieveCache<K, V> {
    /// Entries in insertion order: front = newest, back = oldest.
    list: IntrusiveList<Entry<K, V>>,

    /// Key -> list node.
    index: FxHashMap<K, SlotId>,

    /// Where the next eviction sweep resumes. `None` means start at the back.
    hand: Option<SlotId>,

    capacity: usize,
}

impl<K, V> Default for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with capacity 128.
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new SIEVE cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    ///
    /// # Example
    ///
    /// ```
    /// use sievekit::policy::sieve::SieveCache;
    ///
    /// let cache: SieveCache<String, i32> = SieveCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_config(CacheConfig::with_capacity(capacity))
    }

    /// Creates a new SIEVE cache, returning an error on invalid capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_config(CacheConfig::with_capacity(capacity))
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. See
    /// [`try_with_config`](Self::try_with_config).
    pub fn with_config(config: CacheConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache from a [`CacheConfig`], returning an error on invalid
    /// parameters.
    ///
    /// With `prealloc_memory` set, the entry arena and the index are sized
    /// for `capacity` entries so the insert path never reallocates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `config.capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use sievekit::policy::sieve::SieveCache;
    /// use sievekit::traits::CacheConfig;
    ///
    /// let config = CacheConfig { capacity: 16, prealloc_memory: false };
    /// let cache = SieveCache::<u32, u32>::try_with_config(config).unwrap();
    /// assert_eq!(cache.capacity(), 16);
    /// ```
    pub fn try_with_config(config: CacheConfig) -> Result<Self, ConfigError> {
        let capacity = config.capacity;
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { capacity });
        }

        let (list, index) = if config.prealloc_memory {
            (
                IntrusiveList::with_capacity(capacity),
                FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            )
        } else {
            (IntrusiveList::new(), FxHashMap::default())
        };

        Ok(Self {
            list,
            index,
            hand: None,
            capacity,
        })
    }

    /// Returns the number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the cache capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the key exists. Does not set the visited bit.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Retrieves a value by key without setting the visited bit.
    ///
    /// # Example
    ///
    /// ```
    /// use sievekit::policy::sieve::SieveCache;
    ///
    /// let mut cache = SieveCache::new(2);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    ///
    /// // peek leaves "a" unvisited, so it is still the next victim
    /// assert_eq!(cache.peek(&"a"), Some(&1));
    /// cache.insert("c", 3);
    /// assert!(!cache.contains(&"a"));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the visited bit of `key`, or `None` if it is not cached.
    #[inline]
    pub fn is_visited(&self, key: &K) -> Option<bool> {
        let &id = self.index.get(key)?;
        self.list.get(id).map(|entry| entry.visited)
    }

    /// Retrieves a value by key, marking the entry visited.
    ///
    /// The entry keeps its position; only its visited bit changes.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        let entry = self.list.get_mut(id).expect("index/list out of sync");
        entry.visited = true;
        Some(&entry.value)
    }

    /// Retrieves a mutable reference to a value by key, marking the entry
    /// visited.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let &id = self.index.get(key)?;
        let entry = self.list.get_mut(id).expect("index/list out of sync");
        entry.visited = true;
        Some(&mut entry.value)
    }

    /// Inserts or updates a key-value pair.
    ///
    /// - If the key exists: replaces the value in place, sets the visited bit
    ///   and returns the old value. Position and length are unchanged and no
    ///   eviction runs.
    /// - Otherwise: evicts one entry if the cache is full, then inserts the
    ///   new entry at the front, unvisited.
    ///
    /// # Example
    ///
    /// ```
    /// use sievekit::policy::sieve::SieveCache;
    ///
    /// let mut cache = SieveCache::new(2);
    /// assert_eq!(cache.insert("a", 1), None);
    /// assert_eq!(cache.insert("a", 10), Some(1));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let entry = self.list.get_mut(id).expect("index/list out of sync");
            entry.visited = true;
            return Some(std::mem::replace(&mut entry.value, value));
        }

        if self.len() >= self.capacity && self.evict().is_none() {
            unreachable!("full cache produced no eviction victim");
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
            visited: false,
        });
        self.index.insert(key, id);
        None
    }

    /// Removes a key-value pair from the cache.
    ///
    /// If the hand rests on the removed entry it moves to the entry's newer
    /// neighbor (unset if the entry was the newest).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        if self.hand == Some(id) {
            self.hand = self.list.prev_id(id);
        }
        let entry = self.list.remove(id).expect("index/list out of sync");
        Some(entry.value)
    }

    /// Runs one SIEVE eviction and returns the victim.
    ///
    /// Returns `None` only when the cache is empty. Visited entries passed
    /// over by the sweep have their bit cleared.
    ///
    /// # Example
    ///
    /// ```
    /// use sievekit::policy::sieve::SieveCache;
    ///
    /// let mut cache = SieveCache::new(3);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// cache.get(&1);
    ///
    /// assert_eq!(cache.evict(), Some((2, "two")));
    /// assert_eq!(cache.is_visited(&1), Some(false));
    /// ```
    pub fn evict(&mut self) -> Option<(K, V)> {
        let mut cursor = match self.hand {
            Some(id) => id,
            None => self.list.back_id()?,
        };

        loop {
            let entry = self
                .list
                .get_mut(cursor)
                .expect("eviction hand points at a freed slot");
            if !entry.visited {
                break;
            }
            entry.visited = false;
            cursor = match self.list.prev_id(cursor) {
                Some(newer) => newer,
                None => self.list.back_id().expect("non-empty list has a back"),
            };
        }

        self.hand = self.list.prev_id(cursor);
        let victim = self.list.remove(cursor).expect("eviction victim not linked");
        self.index.remove(&victim.key);
        Some((victim.key, victim.value))
    }

    /// Returns the entry the next eviction would remove, without running the
    /// sweep or touching any visited bit.
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        let start = match self.hand {
            Some(id) => id,
            None => self.list.back_id()?,
        };

        let mut cursor = start;
        loop {
            let entry = self.list.get(cursor)?;
            if !entry.visited {
                return Some((&entry.key, &entry.value));
            }
            cursor = self.list.prev_id(cursor).or(self.list.back_id())?;
            if cursor == start {
                break;
            }
        }

        // Every entry is visited: a full pass clears them all and the sweep
        // lands back on its starting point.
        self.list.get(start).map(|entry| (&entry.key, &entry.value))
    }

    /// Removes all entries and resets the hand. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
        self.hand = None;
    }

    /// Returns an iterator over all key-value pairs, newest first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Returns an iterator over keys, newest first.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values, newest first.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Validates that index, list and hand agree with each other.
    ///
    /// Walks every entry; meant for tests and fuzzing rather than hot paths.
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError>
    where
        K: Debug,
    {
        use crate::error::InvariantError;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "Index size {} != list length {}",
                self.index.len(),
                self.list.len()
            )));
        }

        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "Total entries {} > capacity {}",
                self.list.len(),
                self.capacity
            )));
        }

        let mut count = 0;
        let mut prev: Option<SlotId> = None;
        for id in self.list.iter_ids() {
            count += 1;
            let entry = self
                .list
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("List: stale SlotId {:?}", id)))?;
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "Key {:?} in list is not indexed to its node",
                    entry.key
                )));
            }
            if self.list.prev_id(id) != prev {
                return Err(InvariantError::new(format!(
                    "List: node {:?} prev pointer inconsistent",
                    entry.key
                )));
            }
            prev = Some(id);
        }
        if count != self.index.len() {
            return Err(InvariantError::new(format!(
                "List walk counted {} but index holds {}",
                count,
                self.index.len()
            )));
        }

        if let Some(hand) = self.hand {
            if !self.list.contains(hand) {
                return Err(InvariantError::new(format!(
                    "Hand {:?} points at a freed slot",
                    hand
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Std trait implementations
// ---------------------------------------------------------------------------

impl<K, V> FromIterator<(K, V)> for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut cache = Self::new(lower.max(16));
        for (k, v) in iter {
            cache.insert(k, v);
        }
        cache
    }
}

impl<K, V> Extend<(K, V)> for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> IntoIterator for SieveCache<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self.list }
    }
}

impl<'a, K, V> IntoIterator for &'a SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Debug for SieveCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SieveCache")
            .field("capacity", &self.capacity)
            .field("len", &self.list.len())
            .field("hand_set", &self.hand.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Cache trait implementations
// ---------------------------------------------------------------------------

impl<K, V> ReadOnlyCache<K, V> for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        SieveCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        SieveCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        SieveCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        SieveCache::get(self, key)
    }

    fn clear(&mut self) {
        SieveCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        SieveCache::remove(self, key)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8, u16),
        Get(u8),
        Peek(u8),
        Contains(u8),
        Remove(u8),
        Evict,
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0u8..32, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
            4 => (0u8..32).prop_map(Op::Get),
            1 => (0u8..32).prop_map(Op::Peek),
            1 => (0u8..32).prop_map(Op::Contains),
            1 => (0u8..32).prop_map(Op::Remove),
            1 => Just(Op::Evict),
            1 => Just(Op::Clear),
        ]
    }

    fn apply(cache: &mut SieveCache<u8, u16>, op: &Op) {
        match *op {
            Op::Insert(k, v) => {
                cache.insert(k, v);
            },
            Op::Get(k) => {
                cache.get(&k);
            },
            Op::Peek(k) => {
                cache.peek(&k);
            },
            Op::Contains(k) => {
                cache.contains(&k);
            },
            Op::Remove(k) => {
                cache.remove(&k);
            },
            Op::Evict => {
                cache.evict();
            },
            Op::Clear => cache.clear(),
        }
    }

    proptest! {
        /// len() never exceeds capacity.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_len_within_capacity(
            capacity in 1usize..16,
            ops in prop::collection::vec((0u32..64, 0u32..100), 0..200)
        ) {
            let mut cache = SieveCache::new(capacity);
            for (key, value) in ops {
                cache.insert(key, value);
                prop_assert!(cache.len() <= cache.capacity());
            }
        }

        /// Index, list and hand stay consistent under any operation mix.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_invariants_hold(
            capacity in 1usize..12,
            ops in prop::collection::vec(op_strategy(), 0..300)
        ) {
            let mut cache = SieveCache::new(capacity);
            for op in &ops {
                apply(&mut cache, op);
                prop_assert!(cache.check_invariants().is_ok(), "{:?}", cache.check_invariants());
            }
        }

        /// Interleaving peek/contains never changes what gets evicted.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_peek_is_neutral(
            capacity in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 0..200),
            probes in prop::collection::vec(0u8..32, 0..200)
        ) {
            let mut plain = SieveCache::new(capacity);
            let mut probed = SieveCache::new(capacity);
            for (i, op) in ops.iter().enumerate() {
                if matches!(op, Op::Peek(_) | Op::Contains(_)) {
                    continue;
                }
                apply(&mut plain, op);
                apply(&mut probed, op);
                if let Some(&k) = probes.get(i) {
                    probed.peek(&k);
                    probed.contains(&k);
                }
                let a: Vec<_> = plain.iter().map(|(k, v)| (*k, *v)).collect();
                let b: Vec<_> = probed.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(a, b);
            }
        }

        /// A cleared cache behaves exactly like a fresh one.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_clear_matches_fresh(
            capacity in 1usize..8,
            before in prop::collection::vec(op_strategy(), 0..100),
            after in prop::collection::vec(op_strategy(), 0..100)
        ) {
            let mut reused = SieveCache::new(capacity);
            for op in &before {
                apply(&mut reused, op);
            }
            reused.clear();
            prop_assert_eq!(reused.len(), 0);

            let mut fresh = SieveCache::new(capacity);
            for op in &after {
                apply(&mut reused, op);
                apply(&mut fresh, op);
            }
            let a: Vec<_> = reused.iter().map(|(k, v)| (*k, *v)).collect();
            let b: Vec<_> = fresh.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(a, b);
        }
    }
}
