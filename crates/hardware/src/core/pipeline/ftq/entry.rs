//! Fetch bundles and the queue entries built from them.

use serde::{Deserialize, Serialize};

use crate::common::mask::slot_bit;
use crate::core::units::bru::GlobalHistory;

/// A group of instructions fetched together under one base PC.
///
/// Produced by the fetch pipeline; only the prediction-relevant shape is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchBundle {
    /// Address of the first instruction in the bundle.
    pub pc: u64,
    /// Slot of the first control-flow instruction predicted present.
    #[serde(default)]
    pub cfi_idx: Option<u32>,
    /// Slots holding conditional branches.
    #[serde(default)]
    pub br_mask: u64,
    /// Slots holding unconditional jumps.
    #[serde(default)]
    pub jal_mask: u64,
}

impl FetchBundle {
    /// Bundle at `pc` with no predicted CFI and no branches or jumps.
    pub const fn new(pc: u64) -> Self {
        Self {
            pc,
            cfi_idx: None,
            br_mask: 0,
            jal_mask: 0,
        }
    }

    /// Marks slot `idx` as the predicted CFI.
    #[must_use]
    pub const fn with_cfi(mut self, idx: u32) -> Self {
        self.cfi_idx = Some(idx);
        self
    }

    /// Sets the branch slot mask.
    #[must_use]
    pub const fn with_branches(mut self, mask: u64) -> Self {
        self.br_mask = mask;
        self
    }

    /// Sets the jump slot mask.
    #[must_use]
    pub const fn with_jumps(mut self, mask: u64) -> Self {
        self.jal_mask = mask;
        self
    }
}

/// One slot of the fetch target queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtqEntry {
    /// Address of the first instruction in the bundle.
    pub fetch_pc: u64,
    /// Slot of the bundle's CFI, predicted or corrected.
    pub cfi_idx: Option<u32>,
    /// Current belief that the CFI is taken.
    pub cfi_taken: bool,
    /// Set once a correction has overwritten the prediction.
    pub cfi_mispredicted: bool,
    /// Slots holding conditional branches.
    pub br_mask: u64,
    /// Slots holding unconditional jumps.
    pub jal_mask: u64,
    /// Global history used to predict this bundle.
    pub ghist: GlobalHistory,
}

impl FtqEntry {
    /// Builds a freshly enqueued entry; a predicted CFI is assumed taken.
    pub const fn from_bundle(bundle: &FetchBundle, ghist: GlobalHistory) -> Self {
        Self {
            fetch_pc: bundle.pc,
            cfi_idx: bundle.cfi_idx,
            cfi_taken: bundle.cfi_idx.is_some(),
            cfi_mispredicted: false,
            br_mask: bundle.br_mask,
            jal_mask: bundle.jal_mask,
            ghist,
        }
    }

    /// Whether the CFI slot holds a conditional branch.
    #[inline]
    pub const fn cfi_is_br(&self) -> bool {
        match self.cfi_idx {
            Some(idx) => self.br_mask & slot_bit(idx) != 0,
            None => false,
        }
    }

    /// Whether the CFI slot holds an unconditional jump.
    #[inline]
    pub const fn cfi_is_jal(&self) -> bool {
        match self.cfi_idx {
            Some(idx) => self.jal_mask & slot_bit(idx) != 0,
            None => false,
        }
    }

    /// History for the bundle that follows this one.
    #[inline]
    pub const fn next_ghist(&self) -> GlobalHistory {
        self.ghist.update(self.br_mask, self.cfi_idx, self.cfi_taken)
    }
}
