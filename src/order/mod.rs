//! Core poset machinery: element identity, relation storage, and the
//! closure engine that keeps every committed state a partial order.

pub mod closure;
pub mod element;
pub mod poset;
pub mod relation;
pub mod validation;

pub use element::{ElementId, ElementIndex};
pub use poset::Poset;
pub use relation::RelationStore;
pub use validation::DebugInvariants;
