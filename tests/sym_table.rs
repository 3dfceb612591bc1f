// SymTable / SymTableList integration tests.
//
// Each test documents the behavior it verifies. The invariants exercised:
// - Uniqueness: a duplicate put fails, returns the value and keeps the
//   existing binding.
// - Counting: len() == successful puts - successful removes.
// - Lookup: get/contains/replace/remove agree on presence.
// - Growth: capacity follows BUCKET_COUNTS and bindings survive rehash.
// - Ownership: keys are copied in; values are handed back, never dropped
//   behind the caller's back.
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use symtable::{Growth, SymTable, SymTableError, SymTableList, SymbolTable, BUCKET_COUNTS};

fn hashed() -> Box<dyn Table> {
    Box::new(SymTable::<i32>::new())
}

fn listed() -> Box<dyn Table> {
    Box::new(SymTableList::<i32>::new())
}

fn both(check: impl Fn(fn() -> Box<dyn Table>)) {
    check(hashed);
    check(listed);
}

// Object-safe slice of SymbolTable so one test body covers both kinds.
trait Table {
    fn put(&mut self, k: &str, v: i32) -> Result<(), SymTableError>;
    fn get(&self, k: &str) -> Option<i32>;
    fn contains(&self, k: &str) -> bool;
    fn replace(&mut self, k: &str, v: i32) -> Result<i32, i32>;
    fn remove(&mut self, k: &str) -> Option<i32>;
    fn len(&self) -> usize;
    fn pairs(&self) -> Vec<(String, i32)>;
}

impl<T: SymbolTable<i32>> Table for T {
    fn put(&mut self, k: &str, v: i32) -> Result<(), SymTableError> {
        SymbolTable::put(self, k, v).map_err(|e| e.into_parts().0)
    }
    fn get(&self, k: &str) -> Option<i32> {
        SymbolTable::get(self, k).copied()
    }
    fn contains(&self, k: &str) -> bool {
        SymbolTable::contains(self, k)
    }
    fn replace(&mut self, k: &str, v: i32) -> Result<i32, i32> {
        SymbolTable::replace(self, k, v)
    }
    fn remove(&mut self, k: &str) -> Option<i32> {
        SymbolTable::remove(self, k)
    }
    fn len(&self) -> usize {
        SymbolTable::len(self)
    }
    fn pairs(&self) -> Vec<(String, i32)> {
        let mut out = Vec::new();
        SymbolTable::map(self, |k, v| out.push((k.to_string(), *v)));
        out
    }
}

// Test: put then get on an empty table.
// Verifies: the bound value comes back and len() is 1.
#[test]
fn put_then_get() {
    both(|new| {
        let mut t = new();
        assert_eq!(t.len(), 0);
        t.put("x", 42).unwrap();
        assert_eq!(t.get("x"), Some(42));
        assert!(t.contains("x"));
        assert_eq!(t.len(), 1);
    });
}

// Test: unique keys policy.
// Verifies: second put of the same key fails with DuplicateKey; the first
// value is still bound and len() is unchanged.
#[test]
fn duplicate_put_rejected() {
    both(|new| {
        let mut t = new();
        t.put("k", 1).unwrap();
        assert_eq!(t.put("k", 2), Err(SymTableError::DuplicateKey));
        assert_eq!(t.get("k"), Some(1));
        assert_eq!(t.len(), 1);
    });
}

// Test: negative results on absent keys.
// Verifies: remove/get/contains/replace of a missing key change nothing.
#[test]
fn absent_key_is_not_an_error() {
    both(|new| {
        let mut t = new();
        t.put("present", 1).unwrap();
        assert_eq!(t.remove("absent"), None);
        assert_eq!(t.get("absent"), None);
        assert!(!t.contains("absent"));
        assert_eq!(t.replace("absent", 5), Err(5));
        assert_eq!(t.len(), 1);
        assert_eq!(t.pairs(), [("present".to_string(), 1)]);
    });
}

// Test: replace semantics.
// Verifies: replace returns the previous value and get sees the new one.
#[test]
fn replace_swaps_value() {
    both(|new| {
        let mut t = new();
        t.put("k", 1).unwrap();
        assert_eq!(t.replace("k", 2), Ok(1));
        assert_eq!(t.get("k"), Some(2));
        assert_eq!(t.len(), 1);
    });
}

// Test: remove then reinsert.
// Verifies: removed keys disappear and can be bound again with a new value.
#[test]
fn remove_then_reinsert() {
    both(|new| {
        let mut t = new();
        t.put("k", 1).unwrap();
        assert_eq!(t.remove("k"), Some(1));
        assert!(!t.contains("k"));
        assert_eq!(t.len(), 0);
        t.put("k", 2).unwrap();
        assert_eq!(t.get("k"), Some(2));
    });
}

// Test: map visits each binding exactly once.
// Verifies: {"a":1,"b":2,"c":3} is visited completely whatever the
// insertion order.
#[test]
fn map_visits_every_pair_once() {
    for order in [["a", "b", "c"], ["c", "a", "b"], ["b", "c", "a"]] {
        both(|new| {
            let mut t = new();
            for k in order {
                let v = (k.as_bytes()[0] - b'a' + 1) as i32;
                t.put(k, v).unwrap();
            }
            let pairs = t.pairs();
            assert_eq!(pairs.len(), 3);
            let seen: BTreeMap<String, i32> = pairs.into_iter().collect();
            let expected: BTreeMap<String, i32> =
                [("a", 1), ("b", 2), ("c", 3)].map(|(k, v)| (k.to_string(), v)).into();
            assert_eq!(seen, expected);
        });
    }
}

// Test: length bookkeeping over a mixed sequence.
// Verifies: len() == successful puts - successful removes.
#[test]
fn length_tracks_successful_operations() {
    both(|new| {
        let mut t = new();
        let mut expected = 0usize;
        for i in 0..300 {
            let k = format!("k{}", i % 97);
            if i % 3 == 0 {
                if t.remove(&k).is_some() {
                    expected -= 1;
                }
            } else if t.put(&k, i).is_ok() {
                expected += 1;
            }
            assert_eq!(t.len(), expected);
        }
    });
}

// Test: growth at the first boundary.
// Verifies: capacity becomes 1021 exactly when the 509th key lands, stays
// there for the 510th, and every key keeps its value.
#[test]
fn growth_transition_preserves_bindings() {
    let mut t = SymTable::new();
    let mut transitions = Vec::new();
    for i in 0..510 {
        let before = t.capacity();
        t.put(&format!("id_{i}"), i).unwrap();
        if t.capacity() != before {
            transitions.push((t.len(), before, t.capacity()));
        }
    }
    assert_eq!(transitions, [(509, 509, 1021)]);
    for i in 0..510 {
        assert_eq!(t.get(&format!("id_{i}")), Some(&i));
    }
}

// Test: capacity always comes from the size sequence.
// Verifies: after several growth steps, capacity is an entry of BUCKET_COUNTS.
#[test]
fn capacity_stays_on_sequence() {
    let mut t = SymTable::new();
    for i in 0..5_000 {
        t.put(&i.to_string(), ()).unwrap();
        assert!(BUCKET_COUNTS.contains(&t.capacity()));
    }
    assert_eq!(t.capacity(), 8191);
}

// Test: fixed growth policy.
// Verifies: a Fixed table keeps 509 buckets and still serves lookups.
#[test]
fn fixed_table_serves_past_load_factor_one() {
    let mut t = SymTable::with_growth(Growth::Fixed);
    for i in 0..3_000u32 {
        t.put(&format!("v{i}"), i).unwrap();
    }
    assert_eq!(t.capacity(), 509);
    assert_eq!(t.get("v2999"), Some(&2999));
    assert_eq!(t.remove("v0"), Some(0));
    assert_eq!(t.len(), 2_999);
}

// Test: keys are copied.
// Verifies: mutating or dropping the caller's key buffer does not affect
// the binding.
#[test]
fn key_is_copied_on_put() {
    let mut t = SymTable::new();
    let mut buf = String::from("name");
    t.put(&buf, 1).unwrap();
    buf.push_str("_changed");
    assert_eq!(t.get("name"), Some(&1));
    assert_eq!(t.get(&buf), None);
    drop(buf);
    assert!(t.contains("name"));
}

// Test: values stay owned by the caller.
// Assumes: values are Rc handles to caller-owned payloads.
// Verifies: remove/replace/free hand the handles back; dropping the table
// releases only its handles and never the payloads.
#[test]
fn value_payloads_are_never_released_by_the_table() {
    let a = Rc::new(String::from("payload-a"));
    let b = Rc::new(String::from("payload-b"));
    let mut t = SymTable::new();
    t.put("a", Rc::clone(&a)).unwrap();
    t.put("b", Rc::clone(&b)).unwrap();
    assert_eq!(Rc::strong_count(&a), 2);

    let old = t.replace("a", Rc::clone(&b)).unwrap();
    assert!(Rc::ptr_eq(&old, &a));
    drop(old);
    assert_eq!(Rc::strong_count(&a), 1);
    assert_eq!(Rc::strong_count(&b), 3);

    let back = t.remove("b").unwrap();
    assert!(Rc::ptr_eq(&back, &b));

    let rest = t.free();
    assert_eq!(rest.len(), 1);
    assert!(Rc::ptr_eq(&rest[0], &b));
    drop(rest);
    drop(back);
    assert_eq!(Rc::strong_count(&b), 1);
    assert_eq!(*a, "payload-a");
}

// Test: rejected values come back.
// Assumes: a value type that counts its drops.
// Verifies: a duplicate put does not drop the offered value.
#[test]
fn rejected_value_is_handed_back() {
    struct Counted<'a>(&'a Cell<u32>);
    impl Drop for Counted<'_> {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let drops = Cell::new(0);
    let mut t = SymTableList::new();
    t.put("k", Counted(&drops)).unwrap();
    let err = t.put("k", Counted(&drops)).unwrap_err();
    assert_eq!(drops.get(), 0);
    assert!(err.is_duplicate());
    let rejected = err.into_value();
    assert_eq!(drops.get(), 0);
    drop(rejected);
    assert_eq!(drops.get(), 1);
    drop(t);
    assert_eq!(drops.get(), 2);
}

// Test: borrowed values.
// Verifies: a table of references works without owning the referents.
#[test]
fn table_of_references() {
    let payloads = [10, 20, 30];
    let mut t: SymTable<&i32> = SymTable::new();
    for (i, p) in payloads.iter().enumerate() {
        t.put(&format!("p{i}"), p).unwrap();
    }
    assert!(std::ptr::eq(*t.get("p1").unwrap(), &payloads[1]));
    let mut sum = 0;
    t.map(|_, v| sum += **v);
    assert_eq!(sum, 60);
}

// Test: map_mut.
// Verifies: values change in place and every binding is visited.
#[test]
fn map_mut_updates_all_values() {
    let mut t = SymTable::new();
    for i in 0..1_000 {
        t.put(&format!("n{i}"), i).unwrap();
    }
    t.map_mut(|_, v| *v *= 2);
    assert!((0..1_000).all(|i| t.get(&format!("n{i}")) == Some(&(i * 2))));
}

// Test: visitor context.
// Verifies: state captured by the visitor is threaded through every call.
#[test]
fn map_threads_captured_context() {
    let mut t = SymTableList::new();
    t.put("x", 1).unwrap();
    t.put("y", 2).unwrap();
    let prefix = String::from("sym:");
    let mut lines = Vec::new();
    t.map(|k, v| lines.push(format!("{prefix}{k}={v}")));
    assert_eq!(lines, ["sym:x=1", "sym:y=2"]);
}

// Test: free on a grown table.
// Verifies: every value handle comes back exactly once.
#[test]
fn free_returns_every_value() {
    let mut t = SymTable::new();
    for i in 0..2_000 {
        t.put(&format!("f{i}"), i).unwrap();
    }
    let mut values = t.free();
    values.sort_unstable();
    assert_eq!(values, (0..2_000).collect::<Vec<_>>());
}
