//! The relation-maintenance engine.
//!
//! Stateless algorithms over a [`RelationStore`]: extending a newly
//! declared relation to its transitive closure with exact rollback on
//! antisymmetry conflicts, and guarding relation deletion behind a full
//! reachability check. The engine works purely on [`ElementId`]s; name
//! resolution and existence checks happen one layer up in
//! [`Poset`](crate::order::poset::Poset).

use hashbrown::HashSet;

use crate::order::element::ElementId;
use crate::order::relation::RelationStore;
use crate::poset_error::PosetError;

/// Records `lower ≤ upper` together with every pair its transitive closure
/// implies, returning the number of pairs inserted (the direct pair
/// included).
///
/// On any failure the store is exactly as it was before the call: pairs
/// inserted by the attempt are removed again in reverse insertion order.
///
/// The closure runs as an iterative worklist, never recursion, so chain
/// depth does not translate into call-stack depth. Each popped pair
/// `(x, y)` is bridged against its committed neighbors: predecessors `w`
/// of `x` induce `(w, y)`, successors `z` of `y` induce `(x, z)`. Every
/// insertion strictly grows a pair set bounded by the square of the
/// element count, so the scan reaches a fixed point, and that fixed point
/// is the unique minimal transitive extension regardless of pop order.
///
/// # Complexity
/// O(k · d) pair probes, where k is the number of newly implied pairs and
/// d the largest neighbor count touched.
pub fn extend_order(
    store: &mut RelationStore,
    lower: ElementId,
    upper: ElementId,
) -> Result<usize, PosetError> {
    if lower == upper {
        return Err(PosetError::SelfRelation(lower));
    }
    if store.contains(lower, upper) {
        return Err(PosetError::DuplicateRelation { lower, upper });
    }
    if store.contains(upper, lower) {
        return Err(PosetError::InverseRelationExists { lower, upper });
    }

    // Journal of pairs inserted by this attempt, in insertion order.
    let mut journal: Vec<(ElementId, ElementId)> = Vec::new();
    let mut stack: Vec<(ElementId, ElementId)> = Vec::new();
    let mut candidates: Vec<(ElementId, ElementId)> = Vec::new();

    store.insert(lower, upper);
    journal.push((lower, upper));
    stack.push((lower, upper));

    while let Some((x, y)) = stack.pop() {
        candidates.clear();
        // w ≤ x and x ≤ y imply w ≤ y.
        candidates.extend(
            store
                .below(x)
                .filter(|&w| !store.contains(w, y))
                .map(|w| (w, y)),
        );
        // x ≤ y and y ≤ z imply x ≤ z.
        candidates.extend(
            store
                .above(y)
                .filter(|&z| !store.contains(x, z))
                .map(|z| (x, z)),
        );
        for &(a, b) in &candidates {
            if store.contains(b, a) {
                // Committing (a, b) would put both directions in the store.
                rollback(store, &journal);
                return Err(PosetError::AntisymmetryViolation {
                    lower,
                    upper,
                    via_lower: a,
                    via_upper: b,
                });
            }
            store.insert(a, b);
            journal.push((a, b));
            stack.push((a, b));
        }
    }

    Ok(journal.len())
}

/// Deletes the direct pair `lower ≤ upper`, unless another path still
/// implies the ordering.
///
/// The pair is removed tentatively; if `upper` remains reachable from
/// `lower` through the remaining pairs, the removal is undone and the call
/// fails, because dropping the explicit entry while the ordering is still
/// derivable would leave the stored set smaller than its own closure.
/// Reflexive pairs are permanent and rejected up front.
pub fn retract_order(
    store: &mut RelationStore,
    lower: ElementId,
    upper: ElementId,
) -> Result<(), PosetError> {
    if lower == upper {
        return Err(PosetError::SelfRelation(lower));
    }
    if !store.remove(lower, upper) {
        return Err(PosetError::RelationNotFound { lower, upper });
    }
    if is_reachable(store, lower, upper) {
        store.insert(lower, upper);
        return Err(PosetError::TransitivelyImplied { lower, upper });
    }
    Ok(())
}

/// True if a chain of stored pairs leads from `from` to `to`; `from` is
/// trivially reachable from itself.
///
/// Iterative depth-first search over successor lists with a seen set; a
/// one-hop probe around the endpoints would miss alternate paths longer
/// than two hops, so the whole reachable cone is searched. Self-loops and
/// shared suffixes are absorbed by the seen set, so the search terminates
/// on any store, cyclic or not.
pub fn is_reachable(store: &RelationStore, from: ElementId, to: ElementId) -> bool {
    if from == to {
        return true;
    }
    let mut stack = vec![from];
    let mut seen: HashSet<ElementId> = HashSet::new();
    seen.insert(from);
    while let Some(x) = stack.pop() {
        for y in store.above(x) {
            if y == to {
                return true;
            }
            if seen.insert(y) {
                stack.push(y);
            }
        }
    }
    false
}

fn rollback(store: &mut RelationStore, journal: &[(ElementId, ElementId)]) {
    for &(a, b) in journal.iter().rev() {
        let was_present = store.remove(a, b);
        debug_assert!(was_present, "journaled pair vanished before rollback");
    }
}
