//! Strongly typed craft identifier.
//!
//! A `CraftId` is a stable handle, not a storage index: the owning space
//! hands out ids from a monotonically increasing counter and never reuses
//! them, so removing a craft does not silently re-target handles held by
//! observers or reward policies.

use std::fmt;

/// Identity of a craft within its owning space.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftId(pub u32);

impl CraftId {
    /// Sentinel meaning "not yet registered with a space".
    pub const UNASSIGNED: CraftId = CraftId(u32::MAX);

    #[inline(always)]
    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }

    /// The id that follows `self` in allocation order.
    #[inline]
    pub fn next(self) -> CraftId {
        CraftId(self.0 + 1)
    }
}

impl Default for CraftId {
    /// Returns the `UNASSIGNED` sentinel so unregistered craft are visibly so.
    #[inline(always)]
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for CraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CraftId({})", self.0)
    }
}

impl From<CraftId> for u32 {
    #[inline(always)]
    fn from(id: CraftId) -> u32 {
        id.0
    }
}
