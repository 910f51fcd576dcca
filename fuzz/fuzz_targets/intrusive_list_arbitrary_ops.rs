#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use sievekit::ds::IntrusiveList;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Mirrors every operation on a VecDeque and compares contents, neighbor
// links and invariants after each step.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut mirror: VecDeque<(sievekit::ds::SlotId, u32)> = VecDeque::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                let id = list.push_front(value);
                mirror.push_front((id, value));
            }
            1 => {
                let id = list.push_back(value);
                mirror.push_back((id, value));
            }
            2 => {
                assert_eq!(list.pop_front(), mirror.pop_front().map(|(_, v)| v));
            }
            3 => {
                assert_eq!(list.pop_back(), mirror.pop_back().map(|(_, v)| v));
            }
            4 => {
                if !mirror.is_empty() {
                    let pos = value as usize % mirror.len();
                    let (id, v) = mirror.remove(pos).unwrap();
                    assert_eq!(list.remove(id), Some(v));
                    assert!(!list.contains(id));
                }
            }
            5 => {
                if value % 8 == 0 {
                    list.clear();
                    mirror.clear();
                }
            }
            _ => unreachable!(),
        }

        let values: Vec<_> = list.iter().copied().collect();
        let expected: Vec<_> = mirror.iter().map(|&(_, v)| v).collect();
        assert_eq!(values, expected);

        for (pos, &(id, _)) in mirror.iter().enumerate() {
            let prev = pos.checked_sub(1).map(|p| mirror[p].0);
            let next = mirror.get(pos + 1).map(|&(id, _)| id);
            assert_eq!(list.prev_id(id), prev);
            assert_eq!(list.next_id(id), next);
        }

        list.debug_validate_invariants();
        idx += 2;
    }
});
