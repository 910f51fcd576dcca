#![no_main]

use libfuzzer_sys::fuzz_target;
use sievekit::ds::SlotArena;

// Fuzz arbitrary operation sequences on SlotArena
//
// Tests random sequences of insert, remove, get, get_mut, contains and clear,
// tracking which ids are live so stale ids can be checked for aliasing.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut live = Vec::new();
    let mut dead = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                let id = arena.insert(value);
                assert_eq!(arena.get(id), Some(&value));
                live.push((id, value));
            }
            1 => {
                if !live.is_empty() {
                    let (id, expected) = live.swap_remove(value as usize % live.len());
                    assert_eq!(arena.remove(id), Some(expected));
                    dead.push(id);
                }
            }
            2 => {
                if !live.is_empty() {
                    let slot = value as usize % live.len();
                    let (id, _) = live[slot];
                    if let Some(v) = arena.get_mut(id) {
                        *v = value;
                    }
                    live[slot].1 = value;
                }
            }
            3 => {
                for &(id, expected) in &live {
                    assert_eq!(arena.get(id), Some(&expected));
                }
            }
            4 => {
                for &id in &dead {
                    assert!(!arena.contains(id));
                    assert_eq!(arena.get(id), None);
                }
            }
            5 => {
                if value % 8 == 0 {
                    arena.clear();
                    dead.extend(live.drain(..).map(|(id, _)| id));
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(arena.len(), live.len());
        idx += 2;
    }
});
