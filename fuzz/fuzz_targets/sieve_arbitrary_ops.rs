#![no_main]

use libfuzzer_sys::fuzz_target;
use sievekit::policy::sieve::SieveCache;

// Fuzz arbitrary operation sequences on SieveCache
//
// Tests random sequences of insert, get, peek, contains, remove, evict,
// peek_victim and clear, validating the index/list/hand bookkeeping after
// every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = (data[0] as usize % 50).max(1);
    let mut cache = SieveCache::new(capacity);

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1] as u32;
        let value = data[idx + 2] as u32;

        match op {
            0 => {
                let existed = cache.contains(&key);
                let old_len = cache.len();
                let prev = cache.insert(key, value);
                assert_eq!(prev.is_some(), existed);
                if existed {
                    assert_eq!(cache.len(), old_len);
                }
                assert_eq!(cache.peek(&key), Some(&value));
            }
            1 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.is_visited(&key), Some(true));
                }
            }
            2 => {
                let before = cache.is_visited(&key);
                cache.peek(&key);
                assert_eq!(cache.is_visited(&key), before);
            }
            3 => {
                let _ = cache.contains(&key);
            }
            4 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            }
            5 => {
                let predicted = cache.peek_victim().map(|(k, v)| (*k, *v));
                assert_eq!(cache.evict(), predicted);
            }
            6 => {
                // Insert then read back
                cache.insert(key, value);
                assert_eq!(cache.get(&key), Some(&value));
            }
            7 => {
                if value % 16 == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {}", err);
        }

        idx += 3;
    }
});
