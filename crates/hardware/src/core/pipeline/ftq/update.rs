//! Branch predictor training record.

use serde::{Deserialize, Serialize};

use super::entry::FtqEntry;
use super::index::FtqIdx;
use crate::common::mask::mask_upto;
use crate::core::units::bru::GlobalHistory;

/// One resolved fetch bundle, as handed to the branch predictor.
///
/// Drained in enqueue order, at most once per bundle. A record with `valid`
/// cleared still consumed its slot; the predictor must ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpdUpdate {
    /// Whether the predictor should train on this record.
    pub valid: bool,
    /// Queue slot the record was drained from.
    pub ftq_idx: FtqIdx,
    /// Address of the bundle.
    pub fetch_pc: u64,
    /// Address of the bundle fetched after it (the CFI's resolved target).
    pub target: u64,
    /// Branch slots up to and including the CFI, or all branches without one.
    pub br_mask: u64,
    /// Slot of the CFI, if any.
    pub cfi_idx: Option<u32>,
    /// Whether the CFI was taken.
    pub cfi_taken: bool,
    /// Whether the CFI was corrected after prediction.
    pub cfi_mispredicted: bool,
    /// The CFI is a conditional branch.
    pub cfi_is_br: bool,
    /// The CFI is an unconditional jump.
    pub cfi_is_jal: bool,
    /// History the bundle was predicted with.
    pub ghist: GlobalHistory,
}

impl BpdUpdate {
    /// Builds the record for `entry` at `ftq_idx`, whose successor was fetched at `target`.
    ///
    /// `valid` is set when the entry has something to train on; the caller
    /// may still clear it.
    pub const fn from_entry(ftq_idx: FtqIdx, entry: &FtqEntry, target: u64) -> Self {
        let br_mask = match entry.cfi_idx {
            Some(idx) => entry.br_mask & mask_upto(idx),
            None => entry.br_mask,
        };
        Self {
            valid: entry.cfi_idx.is_some() || entry.br_mask != 0,
            ftq_idx,
            fetch_pc: entry.fetch_pc,
            target,
            br_mask,
            cfi_idx: entry.cfi_idx,
            cfi_taken: entry.cfi_taken,
            cfi_mispredicted: entry.cfi_mispredicted,
            cfi_is_br: entry.cfi_is_br(),
            cfi_is_jal: entry.cfi_is_jal(),
            ghist: entry.ghist,
        }
    }
}
