//! Unified error type for poset-engine public APIs.

use thiserror::Error;

use crate::order::element::ElementId;
use crate::registry::PosetHandle;

/// Errors that can occur in poset-engine operations.
///
/// The boolean facade on [`PosetRegistry`](crate::registry::PosetRegistry)
/// collapses every variant to `false`; the variants exist so the typed API
/// and the diagnostic channel can say precisely what was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PosetError {
    /// Attempted to construct an [`ElementId`] from the reserved zero value.
    #[error("element id must be non-zero (0 is reserved as sentinel)")]
    InvalidElementId,

    /// No poset is registered under the given handle.
    #[error("poset {0} does not exist")]
    UnknownHandle(PosetHandle),

    /// The named element is not present in the poset.
    #[error("element {0:?} does not exist")]
    UnknownElement(String),

    /// An element with the same name is already present.
    #[error("element {0:?} already exists")]
    DuplicateElement(String),

    /// Relation endpoints must be distinct; reflexive pairs are managed by
    /// the engine itself.
    #[error("relation endpoints coincide at element {0}")]
    SelfRelation(ElementId),

    /// The exact ordered pair is already recorded.
    #[error("relation ({lower}, {upper}) already exists")]
    DuplicateRelation { lower: ElementId, upper: ElementId },

    /// The opposite ordered pair is already recorded; adding this one would
    /// form a 2-cycle.
    #[error("relation ({upper}, {lower}) already holds; ({lower}, {upper}) would violate antisymmetry")]
    InverseRelationExists { lower: ElementId, upper: ElementId },

    /// Closing the requested pair transitively would commit a pair whose
    /// inverse is already recorded.
    #[error(
        "closure of ({lower}, {upper}) implies ({via_lower}, {via_upper}), whose inverse already holds"
    )]
    AntisymmetryViolation {
        lower: ElementId,
        upper: ElementId,
        via_lower: ElementId,
        via_upper: ElementId,
    },

    /// The direct ordered pair is not recorded.
    #[error("relation ({lower}, {upper}) does not exist")]
    RelationNotFound { lower: ElementId, upper: ElementId },

    /// The ordering survives through another path, so deleting the direct
    /// pair would leave the stored set smaller than its own closure.
    #[error("relation ({lower}, {upper}) is still implied by another path and cannot be deleted")]
    TransitivelyImplied { lower: ElementId, upper: ElementId },

    /// A live element is missing its explicit reflexive pair.
    #[error("element {0} is missing its reflexive pair")]
    MissingReflexivePair(ElementId),

    /// A stored pair references an id with no live element.
    #[error("relation ({lower}, {upper}) references retired or unknown element {orphan}")]
    DanglingRelation {
        lower: ElementId,
        upper: ElementId,
        orphan: ElementId,
    },

    /// Two pairs compose but their composite is absent.
    #[error("transitivity gap: ({a}, {b}) and ({b}, {c}) hold but ({a}, {c}) is absent")]
    TransitivityGap {
        a: ElementId,
        b: ElementId,
        c: ElementId,
    },

    /// Pair set and adjacency mirrors disagree.
    #[error("relation store mirrors are inconsistent: {0}")]
    MirrorInconsistency(String),

    /// Name-to-id and id-to-name maps disagree.
    #[error("element index maps are desynchronized: {0}")]
    IndexDesync(String),
}

/// Coarse classification of failures.
///
/// Diagnostics only; the boolean facade reports every kind uniformly as
/// `false`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PosetErrorKind {
    /// The request itself is malformed (reserved id, duplicate name, ...).
    InvalidArgument,
    /// The addressed handle, element, or pair does not exist.
    NotFound,
    /// Committing the request would break a partial-order law, or a
    /// structure was found already broken.
    InvariantViolation,
}

impl PosetError {
    /// Classifies this error for coarse-grained handling.
    pub fn kind(&self) -> PosetErrorKind {
        use PosetError::*;
        match self {
            InvalidElementId | DuplicateElement(_) | SelfRelation(_) | DuplicateRelation { .. } => {
                PosetErrorKind::InvalidArgument
            }
            UnknownHandle(_) | UnknownElement(_) | RelationNotFound { .. } => {
                PosetErrorKind::NotFound
            }
            InverseRelationExists { .. }
            | AntisymmetryViolation { .. }
            | TransitivelyImplied { .. }
            | MissingReflexivePair(_)
            | DanglingRelation { .. }
            | TransitivityGap { .. }
            | MirrorInconsistency(_)
            | IndexDesync(_) => PosetErrorKind::InvariantViolation,
        }
    }
}
