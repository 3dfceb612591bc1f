#![cfg(test)]

// Property tests for SymTable kept inside the crate so they can check
// bucket placement through `check_invariants`.

use crate::hash::BUCKET_COUNTS;
use crate::sym_table::{Growth, SymTable};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations: indices shrink to earlier keys and the pool
// itself shrinks, which keeps counterexamples small.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Get(usize),
    Contains(String),
    Replace(usize, i32),
    Remove(usize),
    // Bulk insert of generated keys to cross growth boundaries.
    Fill(usize),
    Map,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            1 => "[a-z]{0,6}".prop_map(Op::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Replace(i, v)),
            2 => idx.clone().prop_map(Op::Remove),
            1 => (0usize..700).prop_map(Op::Fill),
            1 => Just(Op::Map),
        ];
        proptest::collection::vec(op, 1..40).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run(growth: Growth, pool: &[String], ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut sut: SymTable<i32> = SymTable::with_growth(growth);
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut fill_seq = 0usize;

    for op in ops {
        let before_cap = sut.capacity();
        match op {
            Op::Put(i, v) => {
                let k = &pool[i];
                match sut.put(k, v) {
                    Ok(()) => {
                        prop_assert!(!model.contains_key(k));
                        model.insert(k.clone(), v);
                    }
                    Err(e) => {
                        prop_assert!(e.is_duplicate());
                        prop_assert_eq!(e.into_value(), v);
                        prop_assert!(model.contains_key(k));
                    }
                }
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
            Op::Replace(i, v) => {
                let k = &pool[i];
                match model.get_mut(k) {
                    Some(mv) => {
                        prop_assert_eq!(sut.replace(k, v), Ok(*mv));
                        *mv = v;
                    }
                    None => prop_assert_eq!(sut.replace(k, v), Err(v)),
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
            }
            Op::Fill(n) => {
                // Generated keys contain a digit, so they never clash with the pool.
                for _ in 0..n {
                    let k = format!("f{fill_seq}");
                    fill_seq += 1;
                    sut.put(&k, fill_seq as i32).unwrap();
                    model.insert(k, fill_seq as i32);
                }
            }
            Op::Map => {
                let mut seen = BTreeMap::new();
                let mut visits = 0usize;
                sut.map(|k, v| {
                    visits += 1;
                    seen.insert(k.to_string(), *v);
                });
                let expected: BTreeMap<_, _> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(visits, model.len());
                prop_assert_eq!(seen, expected);
            }
        }

        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.capacity() >= before_cap, "capacity shrank");
        if growth == Growth::Expanding && sut.capacity() < BUCKET_COUNTS[BUCKET_COUNTS.len() - 1] {
            prop_assert!(sut.len() < sut.capacity(), "growth missed");
        }
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate puts fail, hand the value back and leave the old binding.
// - get/contains/replace/remove agree with the model.
// - map visits each live binding exactly once.
// - Every binding sits in the bucket its hash selects; capacity stays in
//   the size sequence, never shrinks, and stays ahead of the count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(Growth::Expanding, &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_fixed((pool, ops) in arb_scenario()) {
        run(Growth::Fixed, &pool, ops)?;
    }
}
