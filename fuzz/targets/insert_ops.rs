#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use small_cuckoo::{SmallCuckoo, MAX_ENTRIES};

#[derive(Debug, Arbitrary)]
enum Op {
    Insert(u64, u64),
    Find(u64),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    hint: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: FuzzInput| {
    let mut index = SmallCuckoo::new(usize::from(input.hint));
    let mut model = HashMap::new();

    for op in input.ops {
        match op {
            Op::Insert(k, v) => {
                let res = index.try_insert(k, v);
                if model.contains_key(&k) || model.len() == MAX_ENTRIES {
                    assert!(res.is_err());
                } else {
                    assert!(res.is_ok());
                    model.insert(k, v);
                }
            }
            Op::Find(k) => assert_eq!(index.find(k), model.get(&k).copied()),
        }
    }

    assert_eq!(index.len(), model.len());
    assert_eq!(index.iter().count(), model.len());
    assert!(index.is_consistent());
});
