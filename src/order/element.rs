//! Element identity: dense integer ids and the name/id index.
//!
//! Every element of a poset is a unique name mapped to a small integer
//! [`ElementId`]. Ids are handed out monotonically and never reused within
//! a poset's lifetime, so a surviving relation entry can never end up
//! pointing at a later, unrelated element inserted under the same name.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;

use crate::poset_error::PosetError;

/// A dense, non-zero integer id for one element of one poset.
///
/// `repr(transparent)` over [`NonZeroU32`]: same ABI and niche as `u32`,
/// with 0 reserved as the invalid sentinel, so `Option<ElementId>` is still
/// four bytes.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ElementId(NonZeroU32);

impl ElementId {
    /// Creates an `ElementId` from a raw `u32`.
    ///
    /// # Panics
    /// Panics if `raw == 0`. Use [`ElementId::try_new`] for a fallible path.
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self::try_new(raw).expect("ElementId must be non-zero")
    }

    /// Fallible constructor; rejects the reserved zero value.
    #[inline]
    pub fn try_new(raw: u32) -> Result<Self, PosetError> {
        NonZeroU32::new(raw)
            .map(ElementId)
            .ok_or(PosetError::InvalidElementId)
    }

    /// Returns the raw integer value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementId").field(&self.0.get()).finish()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.get())
    }
}

/// Per-poset bijection between element names and [`ElementId`]s.
///
/// Insertion allocates ids from a monotonic counter that survives both
/// removals and [`ElementIndex::clear`], keeping retired ids permanently
/// dead.
#[derive(Clone, Debug, Default)]
pub struct ElementIndex {
    ids: HashMap<String, ElementId>,
    names: HashMap<ElementId, String>,
    /// Count of ids ever allocated; the next raw id is `allocated + 1`.
    allocated: u32,
}

impl ElementIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no elements are live.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True if `name` is a live element.
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Id of a live element, if any.
    pub fn id_of(&self, name: &str) -> Option<ElementId> {
        self.ids.get(name).copied()
    }

    /// Name of a live element, if any.
    pub fn name_of(&self, id: ElementId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Registers `name` under a fresh id, or `None` if the name is taken.
    pub fn insert(&mut self, name: &str) -> Option<ElementId> {
        if self.ids.contains_key(name) {
            return None;
        }
        self.allocated += 1;
        let id = ElementId::new(self.allocated);
        self.ids.insert(name.to_owned(), id);
        self.names.insert(id, name.to_owned());
        Some(id)
    }

    /// Unregisters `name`, returning the id it held. The id stays retired
    /// for the lifetime of the index.
    pub fn remove(&mut self, name: &str) -> Option<ElementId> {
        let id = self.ids.remove(name)?;
        self.names.remove(&id);
        Some(id)
    }

    /// Drops every element while keeping the allocator position, so ids
    /// retired before the clear stay retired after it.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.names.clear();
    }

    /// Iterates over `(name, id)` for all live elements, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ElementId)> + '_ {
        self.ids.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// Iterates over all live ids, in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.names.keys().copied()
    }
}
