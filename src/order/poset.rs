//! A single mutable poset: named elements plus their order relations.

use std::fmt;

use itertools::Itertools;

use crate::order::closure;
use crate::order::element::{ElementId, ElementIndex};
use crate::order::relation::RelationStore;
use crate::order::validation;
use crate::poset_error::PosetError;

/// One partially ordered set.
///
/// Pairs an [`ElementIndex`] with a [`RelationStore`] and keeps the stored
/// relation set a valid partial order across every mutation: reflexive
/// pairs are recorded on insertion, additions are closed transitively or
/// rejected wholesale, and deletions are refused while another path still
/// implies the ordering. Every mutating operation either fully succeeds or
/// leaves the poset exactly as it was.
///
/// Methods here return typed [`PosetError`]s; the boolean contract lives
/// on [`PosetRegistry`](crate::registry::PosetRegistry).
#[derive(Clone, Debug, Default)]
pub struct Poset {
    elements: ElementIndex,
    relations: RelationStore,
}

impl Poset {
    /// Creates an empty poset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when no elements are present.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of stored relation pairs, reflexive pairs included.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// True if `name` is a live element.
    pub fn contains_element(&self, name: &str) -> bool {
        self.elements.contains(name)
    }

    /// Id of a live element, if any.
    pub fn id_of(&self, name: &str) -> Option<ElementId> {
        self.elements.id_of(name)
    }

    /// Name of a live element, if any.
    pub fn name_of(&self, id: ElementId) -> Option<&str> {
        self.elements.name_of(id)
    }

    /// Iterates over `(name, id)` for all live elements, in arbitrary order.
    pub fn elements(&self) -> impl Iterator<Item = (&str, ElementId)> + '_ {
        self.elements.iter()
    }

    /// Iterates over all stored pairs, reflexive ones included.
    pub fn relations(&self) -> impl Iterator<Item = (ElementId, ElementId)> + '_ {
        self.relations.pairs()
    }

    /// Adds a new element under `name` and records its reflexive pair.
    pub fn insert_element(&mut self, name: &str) -> Result<ElementId, PosetError> {
        let Some(id) = self.elements.insert(name) else {
            return Err(PosetError::DuplicateElement(name.to_owned()));
        };
        self.relations.insert(id, id);
        crate::debug_invariants!(self.validate(), "poset after insert_element");
        Ok(id)
    }

    /// Removes `name` together with every relation pair it participates in,
    /// returning its retired id.
    ///
    /// No closure repair is needed: paths routed through the element
    /// disappear with it, and paths avoiding it keep all their pairs.
    pub fn remove_element(&mut self, name: &str) -> Result<ElementId, PosetError> {
        let Some(id) = self.elements.remove(name) else {
            return Err(PosetError::UnknownElement(name.to_owned()));
        };
        self.relations.purge_element(id);
        crate::debug_invariants!(self.validate(), "poset after remove_element");
        Ok(id)
    }

    /// Declares `a ≤ b` and extends the store to its transitive closure,
    /// returning how many pairs were recorded.
    ///
    /// Fails, with the poset unchanged, when either name is absent, when
    /// the pair is reflexive or already present, or when committing it
    /// would violate antisymmetry (see [`closure::extend_order`]).
    pub fn add_relation(&mut self, a: &str, b: &str) -> Result<usize, PosetError> {
        let lower = self.resolve(a)?;
        let upper = self.resolve(b)?;
        let outcome = closure::extend_order(&mut self.relations, lower, upper);
        crate::debug_invariants!(self.validate(), "poset after add_relation");
        outcome
    }

    /// Retracts the direct pair `a ≤ b`, unless another path still implies
    /// the ordering (see [`closure::retract_order`]).
    pub fn remove_relation(&mut self, a: &str, b: &str) -> Result<(), PosetError> {
        let lower = self.resolve(a)?;
        let upper = self.resolve(b)?;
        let outcome = closure::retract_order(&mut self.relations, lower, upper);
        crate::debug_invariants!(self.validate(), "poset after remove_relation");
        outcome
    }

    /// True iff both elements exist and `a ≤ b` is recorded.
    ///
    /// Reflexive pairs are stored explicitly, so `holds(x, x)` needs no
    /// special case: it is a plain membership hit for a live element and
    /// `false` for a missing one. Queries never error.
    pub fn holds(&self, a: &str, b: &str) -> bool {
        match (self.elements.id_of(a), self.elements.id_of(b)) {
            (Some(lower), Some(upper)) => self.relations.contains(lower, upper),
            _ => false,
        }
    }

    /// Resets to the empty poset. Retired element ids stay retired.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.relations.clear();
    }

    fn resolve(&self, name: &str) -> Result<ElementId, PosetError> {
        self.elements
            .id_of(name)
            .ok_or_else(|| PosetError::UnknownElement(name.to_owned()))
    }

    fn validate(&self) -> Result<(), PosetError> {
        validation::validate_consistency(&self.elements, &self.relations)
    }

    pub(crate) fn components(&self) -> (&ElementIndex, &RelationStore) {
        (&self.elements, &self.relations)
    }
}

impl fmt::Display for Poset {
    /// Renders elements and non-reflexive pairs in sorted order, e.g.
    /// `{a, b, c | a <= b, a <= c, b <= c}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.elements.iter().map(|(name, _)| name).sorted();
        write!(f, "{{{}", names.format(", "))?;
        let rendered = self
            .relations
            .pairs()
            .filter(|&(lower, upper)| lower != upper)
            .filter_map(|(lower, upper)| {
                Some((self.elements.name_of(lower)?, self.elements.name_of(upper)?))
            })
            .sorted()
            .map(|(lower, upper)| format!("{lower} <= {upper}"))
            .join(", ");
        if !rendered.is_empty() {
            write!(f, " | {rendered}")?;
        }
        write!(f, "}}")
    }
}
