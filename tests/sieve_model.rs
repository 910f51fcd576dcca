// ==============================================
// DIFFERENTIAL TESTS AGAINST A REFERENCE MODEL
// ==============================================
//
// `ModelSieve` is a deliberately naive SIEVE: a Vec ordered oldest-first and
// a hand stored as a plain index. It is slow but small enough to check by
// eye. The arena-backed cache must make the same decisions for every
// operation sequence.

use proptest::prelude::*;
use sievekit::prelude::*;

struct ModelEntry {
    key: u8,
    value: u16,
    visited: bool,
}

struct ModelSieve {
    // index 0 = oldest
    entries: Vec<ModelEntry>,
    hand: Option<usize>,
    capacity: usize,
}

impl ModelSieve {
    fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            hand: None,
            capacity,
        }
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn insert(&mut self, key: u8, value: u16) -> Option<u16> {
        if let Some(pos) = self.position(key) {
            let entry = &mut self.entries[pos];
            entry.visited = true;
            return Some(std::mem::replace(&mut entry.value, value));
        }
        if self.entries.len() >= self.capacity {
            self.evict();
        }
        self.entries.push(ModelEntry {
            key,
            value,
            visited: false,
        });
        None
    }

    fn get(&mut self, key: u8) -> Option<u16> {
        let pos = self.position(key)?;
        self.entries[pos].visited = true;
        Some(self.entries[pos].value)
    }

    fn peek(&self, key: u8) -> Option<u16> {
        self.position(key).map(|pos| self.entries[pos].value)
    }

    fn remove(&mut self, key: u8) -> Option<u16> {
        let pos = self.position(key)?;
        let removed = self.entries.remove(pos);
        self.hand = match self.hand {
            Some(h) if pos < h => Some(h - 1),
            Some(h) if pos == h => (h < self.entries.len()).then_some(h),
            other => other,
        };
        Some(removed.value)
    }

    fn evict(&mut self) -> Option<(u8, u16)> {
        if self.entries.is_empty() {
            return None;
        }
        let mut i = self.hand.unwrap_or(0);
        while self.entries[i].visited {
            self.entries[i].visited = false;
            i = (i + 1) % self.entries.len();
        }
        let victim = self.entries.remove(i);
        self.hand = (i < self.entries.len()).then_some(i);
        Some((victim.key, victim.value))
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.hand = None;
    }

    fn snapshot(&self) -> Vec<(u8, u16, bool)> {
        self.entries
            .iter()
            .rev()
            .map(|e| (e.key, e.value, e.visited))
            .collect()
    }
}

fn snapshot(cache: &SieveCache<u8, u16>) -> Vec<(u8, u16, bool)> {
    cache
        .iter()
        .map(|(k, v)| (*k, *v, cache.is_visited(k).unwrap_or(false)))
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u16),
    Get(u8),
    Peek(u8),
    Remove(u8),
    Evict,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0u8..24, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        5 => (0u8..24).prop_map(Op::Get),
        1 => (0u8..24).prop_map(Op::Peek),
        1 => (0u8..24).prop_map(Op::Remove),
        1 => Just(Op::Evict),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Every operation returns what the model returns and leaves the same
    /// entries, order and visited bits behind.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn matches_reference_model(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 0..400)
    ) {
        let mut cache = SieveCache::new(capacity);
        let mut model = ModelSieve::new(capacity);

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(cache.insert(k, v), model.insert(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                },
                Op::Peek(k) => {
                    prop_assert_eq!(cache.peek(&k).copied(), model.peek(k));
                },
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k));
                },
                Op::Evict => {
                    prop_assert_eq!(cache.evict(), model.evict());
                },
                Op::Clear => {
                    cache.clear();
                    model.clear();
                },
            }

            prop_assert_eq!(snapshot(&cache), model.snapshot());
            prop_assert!(cache.len() <= capacity);
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    /// The predicted victim is always the one actually evicted.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn peek_victim_predicts_evict(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 1..200)
    ) {
        let mut cache = SieveCache::new(capacity);
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    cache.insert(k, v);
                },
                Op::Get(k) => {
                    cache.get(&k);
                },
                Op::Remove(k) => {
                    cache.remove(&k);
                },
                Op::Peek(_) | Op::Evict | Op::Clear => {},
            }
        }

        let predicted = cache.peek_victim().map(|(k, v)| (*k, *v));
        prop_assert_eq!(cache.evict(), predicted);
    }
}
