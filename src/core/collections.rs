//! Collection type aliases used throughout the crate.
//!
//! These aliases abstract over the concrete storage and hashing
//! implementations so the choice is made in one place and never leaks into
//! public API signatures.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

/// Internal storage backend for mesh entities.
///
/// A slot map provides stable generational keys with O(1) insertion and
/// removal: a key handed out for an entity stays valid across unrelated
/// allocations and deallocations, and goes stale (fails `contains_key`) once
/// its entity is deleted, so use-after-delete is detectable rather than
/// silently aliasing a recycled slot.
pub type StorageMap<K, V> = SlotMap<K, V>;

/// Hash map with a fast non-cryptographic hasher.
///
/// Keys are internal (entity keys, small integers), never attacker
/// controlled, so `FxHasher` is appropriate.
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Hash set counterpart of [`FastHashMap`].
pub type FastHashSet<K> = FxHashSet<K>;
