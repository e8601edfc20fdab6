//! Whole-poset invariant validation.
//!
//! Mutating operations keep a poset valid by construction; this module
//! re-derives the partial-order laws and the bookkeeping invariants from
//! scratch, so tests and the `check-invariants` feature can catch drift
//! between what the engine promises and what the structures actually hold.

use hashbrown::HashSet;

use crate::order::element::{ElementId, ElementIndex};
use crate::order::poset::Poset;
use crate::order::relation::RelationStore;
use crate::poset_error::PosetError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is
    /// enabled; a no-op otherwise.
    fn debug_assert_invariants(&self);

    /// Validate invariants, returning the first violation encountered.
    fn validate_invariants(&self) -> Result<(), PosetError>;
}

/// Runs a fallible invariant check and panics on error when invariant
/// checking is enabled (debug builds, or the `check-invariants` /
/// `strict-invariants` features). Compiles to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $($ctx:tt)*) => {
        #[cfg(any(
            debug_assertions,
            feature = "strict-invariants",
            feature = "check-invariants"
        ))]
        if let Err(err) = $check {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), err);
        }
    };
}

/// Checks every law and bookkeeping invariant over an element index and a
/// relation store, in order of increasing cost:
///
/// 1. the name/id maps form a bijection;
/// 2. pair set and adjacency mirrors agree;
/// 3. every pair endpoint is a live element;
/// 4. reflexivity: each live element stores its own `(e, e)`;
/// 5. antisymmetry: no two distinct ids are stored in both directions;
/// 6. transitivity: the stored set equals its own closure.
///
/// The first violation is returned; `Ok(())` means the pair of structures
/// is a valid poset snapshot.
///
/// # Complexity
/// Steps 1-5 are linear in elements plus pairs. Step 6 probes every
/// composition, O(p · d) with p stored pairs and d the largest successor
/// count, so keep this out of hot paths in release builds.
pub fn validate_consistency(
    elements: &ElementIndex,
    relations: &RelationStore,
) -> Result<(), PosetError> {
    for (name, id) in elements.iter() {
        match elements.name_of(id) {
            Some(back) if back == name => {}
            Some(back) => {
                return Err(PosetError::IndexDesync(format!(
                    "name {name:?} maps to id {id}, which maps back to {back:?}"
                )));
            }
            None => {
                return Err(PosetError::IndexDesync(format!(
                    "name {name:?} maps to id {id}, which has no name entry"
                )));
            }
        }
    }
    let id_entries = elements.ids().count();
    if id_entries != elements.len() {
        return Err(PosetError::IndexDesync(format!(
            "{} name entries vs {} id entries",
            elements.len(),
            id_entries
        )));
    }

    relations.check_mirrors()?;

    let live: HashSet<ElementId> = elements.ids().collect();
    for (lower, upper) in relations.pairs() {
        for orphan in [lower, upper] {
            if !live.contains(&orphan) {
                return Err(PosetError::DanglingRelation {
                    lower,
                    upper,
                    orphan,
                });
            }
        }
    }

    for id in elements.ids() {
        if !relations.contains(id, id) {
            return Err(PosetError::MissingReflexivePair(id));
        }
    }

    for (lower, upper) in relations.pairs() {
        if lower != upper && relations.contains(upper, lower) {
            return Err(PosetError::InverseRelationExists { lower, upper });
        }
    }

    for (a, b) in relations.pairs() {
        for c in relations.above(b) {
            if !relations.contains(a, c) {
                return Err(PosetError::TransitivityGap { a, b, c });
            }
        }
    }

    Ok(())
}

/// [`validate_consistency`] over a whole [`Poset`].
pub fn validate_poset(poset: &Poset) -> Result<(), PosetError> {
    let (elements, relations) = poset.components();
    validate_consistency(elements, relations)
}

impl DebugInvariants for Poset {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "poset");
    }

    fn validate_invariants(&self) -> Result<(), PosetError> {
        validate_poset(self)
    }
}
