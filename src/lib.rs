//! # poset-engine
//!
//! poset-engine manages collections of independent, mutable partially
//! ordered sets ("posets"), each addressed by an opaque integer handle.
//! Clients create posets, insert and remove named elements, declare or
//! retract order relations, and query whether a relation holds; the engine
//! keeps every poset a valid partial order (reflexive, antisymmetric,
//! transitive) across arbitrary sequences of incremental mutations.
//!
//! ## Features
//! - Handle-addressed [`registry::PosetRegistry`] of independent posets
//!   with arena-indexed lookup and handles that are never reissued
//! - Transitive-closure maintenance on relation addition, with exact
//!   journal rollback when a cycle would violate antisymmetry
//! - Full-reachability guard on relation deletion, so removing a direct
//!   pair can never leave the stored set smaller than its own closure
//! - Atomic mutations: every operation fully succeeds or leaves the poset
//!   exactly as it was
//! - Cloneable, thread-safe [`registry::SharedRegistry`] serializing
//!   access behind one read-write lock
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! poset-engine = "0.1"
//! # Optional features:
//! # features = ["check-invariants"]
//! ```
//!
//! ```rust
//! use poset_engine::prelude::*;
//!
//! let mut registry = PosetRegistry::new();
//! let h = registry.create();
//! registry.insert(h, "a");
//! registry.insert(h, "b");
//! registry.insert(h, "c");
//! assert!(registry.add(h, "a", "b"));
//! assert!(registry.add(h, "b", "c"));
//! assert!(registry.test(h, "a", "c")); // closed transitively
//! assert!(!registry.add(h, "c", "a")); // would form a cycle
//! assert!(registry.test(h, "a", "a")); // reflexive pairs are stored
//! ```
//!
//! ## Diagnostics
//! Registry operations report through [`log`]: one `trace` event per call
//! and one `debug` event per outcome. Failures never escape the boolean
//! facade as anything but `false`; wire up a `log` backend to see why a
//! call was refused. The typed layer underneath
//! ([`order::Poset`]) returns [`PosetError`] for callers that need causes
//! programmatically.

pub mod order;
pub mod poset_error;
pub mod registry;

pub use order::validation::DebugInvariants;
pub use poset_error::{PosetError, PosetErrorKind};

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::order::closure::{extend_order, is_reachable, retract_order};
    pub use crate::order::element::{ElementId, ElementIndex};
    pub use crate::order::poset::Poset;
    pub use crate::order::relation::RelationStore;
    pub use crate::order::validation::DebugInvariants;
    pub use crate::poset_error::{PosetError, PosetErrorKind};
    pub use crate::registry::{PosetHandle, PosetRegistry, SharedRegistry};
}
