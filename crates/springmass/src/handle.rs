//! Stable references to the `Node`s and `Spring`s owned by a `World`.

use core::sync::atomic::{AtomicU64, Ordering};

slotmap::new_key_type! {
    /// Key of a `Node` in the slot map of a `World`.
    pub(crate) struct NodeKey;

    /// Key of a `Spring` in the slot map of a `World`.
    pub(crate) struct SpringKey;
}

/// Source of `WorldId`s, unique for the lifetime of the process.
static NEXT_WORLD_ID: AtomicU64 = AtomicU64::new(0);

/// The identity of a `World`, stamped into every handle it issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct WorldId(u64);

impl WorldId {
    /// Draws a fresh identity.
    pub(crate) fn next() -> Self {
        Self(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to a `Node` in a `World`.
///
/// Handles are cheap to copy and remain valid across unrelated insertions and
/// removals. A handle to a removed `Node` is never reused for another `Node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle {
    /// The `World` that issued the handle.
    pub(crate) world: WorldId,
    /// The slot of the `Node` in that `World`.
    pub(crate) key: NodeKey,
}

/// A handle to a `Spring` in a `World`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpringHandle {
    /// The `World` that issued the handle.
    pub(crate) world: WorldId,
    /// The slot of the `Spring` in that `World`.
    pub(crate) key: SpringKey,
}
