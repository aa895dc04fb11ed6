//! Queue slot index with modulo-`N` arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a slot in the fetch target queue.
///
/// Handed out by enqueue and threaded through the pipeline so later stages
/// can refer back to their bundle's metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtqIdx(pub usize);

impl FtqIdx {
    /// Next slot, wrapping at `capacity`.
    #[inline(always)]
    #[must_use]
    pub const fn wrap_inc(self, capacity: usize) -> Self {
        Self((self.0 + 1) % capacity)
    }

    /// Previous slot, wrapping at `capacity`.
    #[inline(always)]
    #[must_use]
    pub const fn wrap_dec(self, capacity: usize) -> Self {
        Self((self.0 + capacity - 1) % capacity)
    }

    /// Slot `n` positions ahead, wrapping at `capacity`.
    #[inline(always)]
    #[must_use]
    pub const fn wrap_add(self, n: usize, capacity: usize) -> Self {
        Self((self.0 + n % capacity) % capacity)
    }

    /// Number of increments needed to get from `self` to `later`.
    #[inline(always)]
    pub const fn distance_to(self, later: Self, capacity: usize) -> usize {
        (later.0 + capacity - self.0) % capacity
    }
}

impl fmt::Display for FtqIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
