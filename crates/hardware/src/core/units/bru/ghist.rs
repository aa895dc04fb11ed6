//! Speculative global branch history.
//!
//! Every queue entry carries a snapshot of the global history that was used
//! to predict it. The snapshot for a new entry is derived from the previous
//! entry's snapshot and that entry's (possibly corrected) outcome, so a
//! misprediction correction followed by a redirect naturally repairs the
//! history seen by the next bundle.
//!
//! One bundle contributes at most one bit:
//! - a taken conditional branch at the CFI slot shifts in `1`;
//! - otherwise, any branch at or before the CFI slot (or anywhere in the
//!   bundle when there is no CFI) that fell through shifts in `0`;
//! - a bundle with no branches, or that leaves through a jump with no
//!   earlier branch, leaves the history unchanged.

use serde::{Deserialize, Serialize};

use crate::common::mask::{mask_upto, slot_bit};

/// Global history register snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalHistory {
    bits: u64,
    length: u32,
}

impl GlobalHistory {
    /// Empty (reset) history of `length` bits.
    ///
    /// `length` must be in `1..=64`.
    pub const fn empty(length: usize) -> Self {
        Self {
            bits: 0,
            length: length as u32,
        }
    }

    /// Raw history bits, most recent outcome in bit 0.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of history bits tracked.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length as usize
    }

    /// Mask of the valid history bits.
    #[inline]
    const fn mask(&self) -> u64 {
        if self.length == 0 {
            0
        } else {
            mask_upto(self.length - 1)
        }
    }

    /// Shifts one outcome into the history.
    #[inline]
    #[must_use]
    pub const fn push(self, taken: bool) -> Self {
        Self {
            bits: ((self.bits << 1) | taken as u64) & self.mask(),
            length: self.length,
        }
    }

    /// Folds one fetch bundle's outcome into the history.
    ///
    /// # Arguments
    ///
    /// * `br_mask` - Slots of the bundle holding conditional branches.
    /// * `cfi_idx` - Slot of the bundle's control-flow instruction, if any.
    /// * `cfi_taken` - Whether that CFI is (now believed to be) taken.
    #[must_use]
    pub const fn update(self, br_mask: u64, cfi_idx: Option<u32>, cfi_taken: bool) -> Self {
        let (taken_branch, not_taken) = match cfi_idx {
            Some(idx) => {
                let taken_branch = cfi_taken && (br_mask & slot_bit(idx)) != 0;
                let mut seen = br_mask & mask_upto(idx);
                if taken_branch {
                    seen &= !slot_bit(idx);
                }
                (taken_branch, seen)
            }
            None => (false, br_mask),
        };

        if taken_branch {
            self.push(true)
        } else if not_taken != 0 {
            self.push(false)
        } else {
            self
        }
    }
}
