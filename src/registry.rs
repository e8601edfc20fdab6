//! Handle-addressed registry of independent posets.
//!
//! [`PosetRegistry`] is an explicit context object, not a process-global:
//! it owns every poset it created and resolves opaque [`PosetHandle`]s
//! through a dense arena, so lookup is a bounds-checked index rather than
//! a hash. The boolean operation facade mirrors the stable external
//! contract: every failure collapses to `false` (or `0` for [`size`]),
//! with the specific cause reported on the diagnostic channel only.
//!
//! Diagnostics are emitted through [`log`]: one `trace` event per call and
//! one `debug` event per outcome. The channel is purely observational; the
//! engine behaves identically whether or not a logger is wired up.
//!
//! [`size`]: PosetRegistry::size

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::order::poset::Poset;
use crate::poset_error::PosetError;

/// Opaque integer handle addressing one poset in a registry.
///
/// Handles are issued monotonically and never reassigned, even after the
/// poset they addressed is destroyed; a stale handle keeps failing instead
/// of aliasing a younger poset.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct PosetHandle(u64);

impl PosetHandle {
    /// Reconstructs a handle from its raw value, e.g. one received over a
    /// foreign boundary. No validity is implied; operations on a handle
    /// the registry never issued simply fail.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for PosetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PosetHandle").field(&self.0).finish()
    }
}

impl fmt::Display for PosetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns a collection of independent posets addressed by handle.
///
/// Backing storage is a slot arena indexed by handle value: creation
/// pushes a fresh slot, destruction leaves a permanent `None`, so handle
/// resolution never confuses generations.
#[derive(Debug, Default)]
pub struct PosetRegistry {
    slots: Vec<Option<Poset>>,
}

impl PosetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not destroyed) posets.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no posets are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared access to the poset under `handle`.
    pub fn get(&self, handle: PosetHandle) -> Option<&Poset> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    /// Exclusive access to the poset under `handle`.
    pub fn get_mut(&mut self, handle: PosetHandle) -> Option<&mut Poset> {
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    /// [`PosetRegistry::get`] with a typed error for the failure case.
    pub fn try_get(&self, handle: PosetHandle) -> Result<&Poset, PosetError> {
        self.get(handle).ok_or(PosetError::UnknownHandle(handle))
    }

    /// [`PosetRegistry::get_mut`] with a typed error for the failure case.
    pub fn try_get_mut(&mut self, handle: PosetHandle) -> Result<&mut Poset, PosetError> {
        self.get_mut(handle).ok_or(PosetError::UnknownHandle(handle))
    }

    /// Iterates over `(handle, poset)` for every live poset.
    pub fn iter(&self) -> impl Iterator<Item = (PosetHandle, &Poset)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|poset| (PosetHandle(i as u64), poset)))
    }

    /// Allocates a fresh empty poset and returns its handle. Never fails.
    pub fn create(&mut self) -> PosetHandle {
        log::trace!("create()");
        let handle = PosetHandle(self.slots.len() as u64);
        self.slots.push(Some(Poset::new()));
        log::debug!("poset {handle} created");
        handle
    }

    /// Destroys the poset under `handle`, retiring the handle for good.
    /// `false` if the handle is unknown or already destroyed.
    pub fn destroy(&mut self, handle: PosetHandle) -> bool {
        log::trace!("destroy({handle})");
        match self.slots.get_mut(handle.index()) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                log::debug!("poset {handle} deleted");
                true
            }
            _ => {
                log::debug!("poset {handle} does not exist");
                false
            }
        }
    }

    /// Element count of the poset under `handle`, or `0` if the handle is
    /// unknown. An empty poset and a dead handle both answer `0`; callers
    /// needing to tell them apart use [`PosetRegistry::get`].
    pub fn size(&self, handle: PosetHandle) -> usize {
        log::trace!("size({handle})");
        match self.try_get(handle) {
            Ok(poset) => {
                let n = poset.len();
                log::debug!("poset {handle} contains {n} element(s)");
                n
            }
            Err(err) => {
                log::debug!("{err}");
                0
            }
        }
    }

    /// Inserts element `name` into the poset under `handle`.
    /// `false`, with nothing changed, if the handle is unknown or the name
    /// is already present.
    pub fn insert(&mut self, handle: PosetHandle, name: &str) -> bool {
        log::trace!("insert({handle}, {name:?})");
        let poset = match self.try_get_mut(handle) {
            Ok(poset) => poset,
            Err(err) => {
                log::debug!("{err}");
                return false;
            }
        };
        match poset.insert_element(name) {
            Ok(_) => {
                log::debug!("poset {handle}: element {name:?} inserted");
                true
            }
            Err(err) => {
                log::debug!("poset {handle}: {err}");
                false
            }
        }
    }

    /// Removes element `name` and every relation it participates in.
    /// `false` if the handle or the element is unknown.
    pub fn remove(&mut self, handle: PosetHandle, name: &str) -> bool {
        log::trace!("remove({handle}, {name:?})");
        let poset = match self.try_get_mut(handle) {
            Ok(poset) => poset,
            Err(err) => {
                log::debug!("{err}");
                return false;
            }
        };
        match poset.remove_element(name) {
            Ok(_) => {
                log::debug!("poset {handle}: element {name:?} removed");
                true
            }
            Err(err) => {
                log::debug!("poset {handle}: {err}");
                false
            }
        }
    }

    /// Declares `a ≤ b` and closes the relation transitively, atomically.
    /// `false`, with the poset unchanged, if the handle or either element
    /// is unknown, the pair is reflexive or already present, or the
    /// addition would violate antisymmetry.
    pub fn add(&mut self, handle: PosetHandle, a: &str, b: &str) -> bool {
        log::trace!("add({handle}, {a:?}, {b:?})");
        let poset = match self.try_get_mut(handle) {
            Ok(poset) => poset,
            Err(err) => {
                log::debug!("{err}");
                return false;
            }
        };
        match poset.add_relation(a, b) {
            Ok(added) => {
                log::debug!("poset {handle}: relation ({a:?}, {b:?}) added ({added} pair(s))");
                true
            }
            Err(err) => {
                log::debug!("poset {handle}: relation ({a:?}, {b:?}) cannot be added: {err}");
                false
            }
        }
    }

    /// Retracts the direct pair `a ≤ b`. `false` if the handle, either
    /// element, or the pair is unknown, if the pair is reflexive, or if
    /// the ordering is still implied by another path.
    pub fn del(&mut self, handle: PosetHandle, a: &str, b: &str) -> bool {
        log::trace!("del({handle}, {a:?}, {b:?})");
        let poset = match self.try_get_mut(handle) {
            Ok(poset) => poset,
            Err(err) => {
                log::debug!("{err}");
                return false;
            }
        };
        match poset.remove_relation(a, b) {
            Ok(()) => {
                log::debug!("poset {handle}: relation ({a:?}, {b:?}) deleted");
                true
            }
            Err(err) => {
                log::debug!("poset {handle}: relation ({a:?}, {b:?}) cannot be deleted: {err}");
                false
            }
        }
    }

    /// True iff the poset and both elements exist and `a ≤ b` is recorded.
    /// With explicit reflexive pairs, `test(h, x, x)` is an ordinary
    /// membership hit for a live `x` and `false` for a missing one.
    pub fn test(&self, handle: PosetHandle, a: &str, b: &str) -> bool {
        log::trace!("test({handle}, {a:?}, {b:?})");
        let poset = match self.try_get(handle) {
            Ok(poset) => poset,
            Err(err) => {
                log::debug!("{err}");
                return false;
            }
        };
        let holds = poset.holds(a, b);
        log::debug!(
            "poset {handle}: relation ({a:?}, {b:?}) {}",
            if holds { "holds" } else { "does not hold" }
        );
        holds
    }

    /// Resets the poset under `handle` to empty, keeping the handle valid.
    /// `false` only for an unknown handle; clearing an already empty poset
    /// succeeds, so the call is idempotent.
    pub fn clear(&mut self, handle: PosetHandle) -> bool {
        log::trace!("clear({handle})");
        match self.try_get_mut(handle) {
            Ok(poset) => {
                poset.clear();
                log::debug!("poset {handle} cleared");
                true
            }
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }
}

/// Cloneable, thread-safe handle to a [`PosetRegistry`].
///
/// Access is serialized through one registry-wide [`RwLock`]: mutating
/// operations take the write lock, [`size`](SharedRegistry::size) and
/// [`test`](SharedRegistry::test) share the read lock. Callers needing
/// per-poset parallelism can shard work across several registries.
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<PosetRegistry>>,
}

impl SharedRegistry {
    /// Creates an empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`PosetRegistry::create`].
    pub fn create(&self) -> PosetHandle {
        self.inner.write().create()
    }

    /// See [`PosetRegistry::destroy`].
    pub fn destroy(&self, handle: PosetHandle) -> bool {
        self.inner.write().destroy(handle)
    }

    /// See [`PosetRegistry::size`].
    pub fn size(&self, handle: PosetHandle) -> usize {
        self.inner.read().size(handle)
    }

    /// See [`PosetRegistry::insert`].
    pub fn insert(&self, handle: PosetHandle, name: &str) -> bool {
        self.inner.write().insert(handle, name)
    }

    /// See [`PosetRegistry::remove`].
    pub fn remove(&self, handle: PosetHandle, name: &str) -> bool {
        self.inner.write().remove(handle, name)
    }

    /// See [`PosetRegistry::add`].
    pub fn add(&self, handle: PosetHandle, a: &str, b: &str) -> bool {
        self.inner.write().add(handle, a, b)
    }

    /// See [`PosetRegistry::del`].
    pub fn del(&self, handle: PosetHandle, a: &str, b: &str) -> bool {
        self.inner.write().del(handle, a, b)
    }

    /// See [`PosetRegistry::test`].
    pub fn test(&self, handle: PosetHandle, a: &str, b: &str) -> bool {
        self.inner.read().test(handle, a, b)
    }

    /// See [`PosetRegistry::clear`].
    pub fn clear(&self, handle: PosetHandle) -> bool {
        self.inner.write().clear(handle)
    }

    /// Runs `f` with shared access to the underlying registry, for
    /// multi-call reads under one lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&PosetRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access to the underlying registry, for
    /// multi-call transactions under one lock acquisition.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut PosetRegistry) -> R) -> R {
        f(&mut self.inner.write())
    }
}
