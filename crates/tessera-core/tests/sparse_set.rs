//! Generational arena behavior as the object store relies on it: stable
//! handles, stale handle detection and slot reuse.

use tessera_core::alloc::sparse_set::{IndexSlot, SparseSet};

#[derive(Debug, PartialEq)]
struct Record {
    name: &'static str,
    hits: u32,
}

fn record(name: &'static str) -> Record {
    Record { name, hits: 0 }
}

#[test]
fn handles_stay_valid_while_others_come_and_go() {
    let mut set = SparseSet::new();
    let keep = set.push(record("keep"));
    for _ in 0..16 {
        let temp = set.push(record("temp"));
        set.remove(temp);
    }
    assert_eq!(set.get(keep).name, "keep");
    assert_eq!(set.len(), 1);
}

#[test]
fn get_mut_writes_through() {
    let mut set = SparseSet::new();
    let idx = set.push(record("a"));
    set.get_mut(idx).hits += 3;
    assert_eq!(set.get(idx).hits, 3);
}

#[test]
fn out_of_range_handle_is_none() {
    let set = SparseSet::<Record>::new();
    assert!(set.try_get(IndexSlot::new(0, 999)).is_none());
}

#[test]
#[should_panic(expected = "invalid generation")]
fn stale_handle_panics_on_get() {
    let mut set = SparseSet::new();
    let idx = set.push(record("gone"));
    set.remove(idx);
    let _ = set.get(idx);
}

#[test]
#[should_panic]
fn double_remove_panics() {
    let mut set = SparseSet::new();
    let idx = set.push(record("gone"));
    set.remove(idx);
    set.remove(idx);
}

#[test]
fn reused_slot_gets_new_generation() {
    let mut set = SparseSet::new();
    let first = set.push(record("first"));
    let middle = set.push(record("middle"));
    set.push(record("last"));

    set.remove(middle);
    let reused = set.push(record("reused"));

    assert_eq!(reused.index(), middle.index());
    assert_eq!(reused.generation(), middle.generation() + 1);
    assert!(set.try_get(middle).is_none());
    assert_eq!(set.get(reused).name, "reused");
    assert_eq!(set.get(first).name, "first");
}

#[test]
fn generations_keep_counting() {
    let mut set = SparseSet::new();
    let mut idx = set.push(0);
    for expected in 1..5 {
        set.remove(idx);
        idx = set.push(expected);
        assert_eq!(idx.generation(), expected);
    }
}

#[test]
fn iteration_skips_removed_values() {
    let mut set = SparseSet::new();
    set.push(10);
    let hole = set.push(20);
    set.push(30);
    set.remove(hole);

    let forward: Vec<_> = set.iter().copied().collect();
    let backward: Vec<_> = set.iter().rev().copied().collect();
    assert_eq!(forward, vec![10, 30]);
    assert_eq!(backward, vec![30, 10]);
}

#[test]
fn iter_mut_updates_every_value() {
    let mut set = SparseSet::new();
    for name in ["a", "b", "c"] {
        set.push(record(name));
    }
    for value in set.iter_mut() {
        value.hits += 1;
    }
    assert!(set.iter().all(|r| r.hits == 1));
}

#[test]
fn len_tracks_churn() {
    let mut set = SparseSet::with_capacity(64);
    let handles: Vec<_> = (0..100).map(|i| set.push(i)).collect();
    for idx in handles.iter().step_by(2) {
        set.remove(*idx);
    }
    assert_eq!(set.len(), 50);

    for i in 100..150 {
        set.push(i);
    }
    assert_eq!(set.len(), 100);
}
