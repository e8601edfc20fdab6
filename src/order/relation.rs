//! Ordered-pair storage for one poset.
//!
//! [`RelationStore`] keeps the relation set in three mutually consistent
//! structures: an exact pair set for O(1) membership, and mirrored
//! above/below adjacency lists for neighbor enumeration in either
//! direction. The store is deliberately dumb about ordering laws; closure,
//! antisymmetry, and reachability live in [`crate::order::closure`].

use std::collections::HashMap;

use hashbrown::HashSet;

use crate::order::element::ElementId;
use crate::poset_error::PosetError;

/// Relation set over element ids with mirrored adjacency.
///
/// A stored pair `(lower, upper)` reads as `lower ≤ upper`. The store makes
/// no ordering promises of its own; [`Poset`](crate::order::poset::Poset)
/// only ever commits states that are valid partial orders.
#[derive(Clone, Debug, Default)]
pub struct RelationStore {
    /// Authoritative pair membership.
    pairs: HashSet<(ElementId, ElementId)>,
    /// For each id, the ids recorded above it.
    above: HashMap<ElementId, Vec<ElementId>>,
    /// Mirror of `above`: for each id, the ids recorded below it.
    below: HashMap<ElementId, Vec<ElementId>>,
}

impl RelationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pairs, reflexive pairs included.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// O(1) membership test for the ordered pair `(lower, upper)`.
    #[inline]
    pub fn contains(&self, lower: ElementId, upper: ElementId) -> bool {
        self.pairs.contains(&(lower, upper))
    }

    /// Records `(lower, upper)`. Returns `false`, with the store unchanged,
    /// if the pair was already present.
    pub fn insert(&mut self, lower: ElementId, upper: ElementId) -> bool {
        if !self.pairs.insert((lower, upper)) {
            return false;
        }
        self.above.entry(lower).or_default().push(upper);
        self.below.entry(upper).or_default().push(lower);
        true
    }

    /// Removes `(lower, upper)`. Returns `false` if it was not present.
    pub fn remove(&mut self, lower: ElementId, upper: ElementId) -> bool {
        if !self.pairs.remove(&(lower, upper)) {
            return false;
        }
        Self::scrub(&mut self.above, lower, upper);
        Self::scrub(&mut self.below, upper, lower);
        true
    }

    /// Drops `target` from the adjacency list under `key`, removing the
    /// list once empty so retired ids leave no residue behind.
    fn scrub(map: &mut HashMap<ElementId, Vec<ElementId>>, key: ElementId, target: ElementId) {
        if let Some(list) = map.get_mut(&key) {
            list.retain(|&id| id != target);
            if list.is_empty() {
                map.remove(&key);
            }
        }
    }

    /// Ids recorded above `id`: every `u` with `(id, u)` stored, `id`
    /// itself included while its reflexive pair is recorded.
    pub fn above(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.above.get(&id).into_iter().flatten().copied()
    }

    /// Mirror of [`RelationStore::above`]: every `l` with `(l, id)` stored.
    pub fn below(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.below.get(&id).into_iter().flatten().copied()
    }

    /// Removes every pair with `id` as either endpoint, returning how many
    /// pairs were dropped.
    ///
    /// Used when an element leaves the poset. The remainder needs no
    /// closure repair: every path through `id` leaves together with it,
    /// and paths avoiding `id` keep all their pairs.
    pub fn purge_element(&mut self, id: ElementId) -> usize {
        let mut removed = 0;
        for upper in self.above.remove(&id).unwrap_or_default() {
            if self.pairs.remove(&(id, upper)) {
                removed += 1;
            }
            Self::scrub(&mut self.below, upper, id);
        }
        for lower in self.below.remove(&id).unwrap_or_default() {
            if self.pairs.remove(&(lower, id)) {
                removed += 1;
            }
            Self::scrub(&mut self.above, lower, id);
        }
        removed
    }

    /// Enumerates all stored pairs, in arbitrary order.
    pub fn pairs(&self) -> impl Iterator<Item = (ElementId, ElementId)> + '_ {
        self.pairs.iter().copied()
    }

    /// Drops every pair.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.above.clear();
        self.below.clear();
    }

    /// Checks that the pair set and both adjacency mirrors describe the
    /// same relation.
    pub(crate) fn check_mirrors(&self) -> Result<(), PosetError> {
        let mut above_total = 0;
        for (&lower, uppers) in &self.above {
            above_total += uppers.len();
            for &upper in uppers {
                if !self.pairs.contains(&(lower, upper)) {
                    return Err(PosetError::MirrorInconsistency(format!(
                        "above[{lower}] lists {upper} but the pair is not stored"
                    )));
                }
                if uppers.iter().filter(|&&u| u == upper).count() != 1 {
                    return Err(PosetError::MirrorInconsistency(format!(
                        "above[{lower}] lists {upper} more than once"
                    )));
                }
            }
        }
        let mut below_total = 0;
        for (&upper, lowers) in &self.below {
            below_total += lowers.len();
            for &lower in lowers {
                if !self.pairs.contains(&(lower, upper)) {
                    return Err(PosetError::MirrorInconsistency(format!(
                        "below[{upper}] lists {lower} but the pair is not stored"
                    )));
                }
            }
        }
        if above_total != self.pairs.len() || below_total != self.pairs.len() {
            return Err(PosetError::MirrorInconsistency(format!(
                "pair count {} vs above entries {} vs below entries {}",
                self.pairs.len(),
                above_total,
                below_total
            )));
        }
        Ok(())
    }

    /// Panics if the mirrors have drifted from the pair set.
    /// Active only when invariant checking is enabled.
    pub fn debug_assert_consistent(&self) {
        crate::debug_invariants!(self.check_mirrors(), "relation store mirrors");
    }
}
