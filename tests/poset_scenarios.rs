//! End-to-end walkthroughs of the boolean registry contract.

use poset_engine::registry::{PosetHandle, PosetRegistry};

#[test]
fn fresh_poset_insertion_and_duplicates() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    assert_eq!(registry.size(h), 0);
    assert!(registry.insert(h, "A"));
    assert!(!registry.insert(h, "A"));
    assert_eq!(registry.size(h), 1);
}

#[test]
fn added_relations_close_transitively() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    for name in ["A", "B", "C"] {
        assert!(registry.insert(h, name));
    }
    assert!(registry.add(h, "A", "B"));
    assert!(registry.add(h, "B", "C"));
    assert!(registry.test(h, "A", "C"));
    assert!(!registry.test(h, "C", "A"));
}

#[test]
fn deleting_the_only_path_link_commits() {
    // A <= B <= C, closed to include (A, C). Deleting (A, B) leaves no
    // path from A to B, so the deletion commits; (A, C) was materialized
    // at add time and survives as a direct fact.
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    for name in ["A", "B", "C"] {
        registry.insert(h, name);
    }
    registry.add(h, "A", "B");
    registry.add(h, "B", "C");

    assert!(registry.del(h, "A", "B"));
    assert!(!registry.test(h, "A", "B"));
    assert!(registry.test(h, "A", "C"));
    assert!(registry.test(h, "B", "C"));

    // The surviving (A, C) is now uncovered and can go too.
    assert!(registry.del(h, "A", "C"));
    assert!(!registry.test(h, "A", "C"));
}

#[test]
fn deleting_a_covered_pair_is_refused() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    for name in ["A", "B", "C"] {
        registry.insert(h, name);
    }
    registry.add(h, "A", "B");
    registry.add(h, "B", "C");

    assert!(!registry.del(h, "A", "C"));
    assert!(registry.test(h, "A", "C"));
}

#[test]
fn relation_on_missing_element_changes_nothing() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    registry.insert(h, "X");
    assert!(!registry.add(h, "X", "Y"));
    assert_eq!(registry.size(h), 1);
    assert!(!registry.test(h, "X", "Y"));
    // Y was not created as a side effect.
    assert!(registry.insert(h, "Y"));
}

#[test]
fn cycles_are_rejected_in_both_directions() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    registry.insert(h, "D");
    registry.insert(h, "E");
    assert!(registry.add(h, "D", "E"));
    assert!(!registry.add(h, "E", "D"));
    assert!(registry.test(h, "D", "E"));
    assert!(!registry.test(h, "E", "D"));
}

#[test]
fn longer_cycles_are_rejected_through_the_closure() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    for name in ["D", "E", "F"] {
        registry.insert(h, name);
    }
    assert!(registry.add(h, "D", "E"));
    assert!(registry.add(h, "E", "F"));
    assert!(!registry.add(h, "F", "D"));
    assert!(!registry.test(h, "F", "D"));
}

#[test]
fn reflexive_pairs_track_element_lifetime() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    assert!(!registry.test(h, "A", "A"));
    registry.insert(h, "A");
    assert!(registry.test(h, "A", "A"));
    registry.remove(h, "A");
    assert!(!registry.test(h, "A", "A"));
}

#[test]
fn reflexive_relations_cannot_be_added_or_deleted() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    registry.insert(h, "A");
    assert!(!registry.add(h, "A", "A"));
    assert!(!registry.del(h, "A", "A"));
    assert!(registry.test(h, "A", "A"));
}

#[test]
fn removing_an_element_detaches_it_everywhere() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    for name in ["A", "B", "C"] {
        registry.insert(h, name);
    }
    registry.add(h, "A", "B");
    registry.add(h, "B", "C");

    assert!(registry.remove(h, "B"));
    assert!(!registry.remove(h, "B"));
    assert_eq!(registry.size(h), 2);
    assert!(!registry.test(h, "A", "B"));
    assert!(!registry.test(h, "B", "C"));
    assert!(registry.test(h, "A", "C"));
}

#[test]
fn reinserted_element_starts_unrelated() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    registry.insert(h, "A");
    registry.insert(h, "B");
    registry.add(h, "A", "B");

    registry.remove(h, "A");
    assert!(registry.insert(h, "A"));
    assert!(!registry.test(h, "A", "B"));
    assert!(registry.test(h, "A", "A"));
}

/// Snapshot of every test() answer over a fixed name universe.
fn relation_matrix(registry: &PosetRegistry, h: PosetHandle) -> Vec<bool> {
    const NAMES: [&str; 4] = ["A", "B", "C", "D"];
    let mut matrix = Vec::with_capacity(NAMES.len() * NAMES.len());
    for a in NAMES {
        for b in NAMES {
            matrix.push(registry.test(h, a, b));
        }
    }
    matrix
}

#[test]
fn failed_operations_leave_no_observable_trace() {
    let mut registry = PosetRegistry::new();
    let h = registry.create();
    for name in ["A", "B", "C"] {
        registry.insert(h, name);
    }
    registry.add(h, "A", "B");
    registry.add(h, "B", "C");

    let before = relation_matrix(&registry, h);
    assert!(!registry.add(h, "C", "A")); // cycle
    assert!(!registry.add(h, "A", "B")); // duplicate
    assert!(!registry.add(h, "A", "D")); // unknown element
    assert!(!registry.del(h, "A", "C")); // still covered
    assert!(!registry.del(h, "C", "B")); // never existed
    assert!(!registry.remove(h, "D")); // unknown element
    assert_eq!(relation_matrix(&registry, h), before);
    assert_eq!(registry.size(h), 3);
}
