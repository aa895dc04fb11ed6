//! Fetch Target Queue (FTQ).
//!
//! The FTQ is a circular buffer holding one entry per in-flight fetch bundle,
//! from fetch until the bundle has been committed and used to train the
//! branch predictor. It provides:
//! 1. **Enqueue:** Records a bundle's PC, predicted CFI, slot masks and global history.
//! 2. **Lookup:** Gives execution units a bundle's metadata, the next bundle's PC and the retire PC.
//! 3. **Correction:** Overwrites a bundle's CFI outcome after branch resolution.
//! 4. **Redirect:** Rewinds the enqueue cursor, discarding wrong-path bundles.
//! 5. **Training:** Drains one predictor update per step, in enqueue order, exactly once.
//!
//! Three cursors walk the ring. From oldest to youngest: `update` (next entry
//! to train), `retire` (oldest entry not yet committed) and `enqueue` (next
//! free slot). Training trails commit, and trails enqueue by at least one
//! slot so a bundle's successor PC is known when it is trained.

/// Fetch bundles and queue entries.
pub mod entry;

/// Slot index type.
pub mod index;

/// Per-step inputs and outputs.
pub mod signals;

/// Predictor training record.
pub mod update;

pub use self::entry::{FetchBundle, FtqEntry};
pub use self::index::FtqIdx;
pub use self::signals::{
    Correction, FtqInputs, FtqOutputs, LookupRequest, LookupResponse, Redirect,
};
pub use self::update::BpdUpdate;

use tracing::{debug, trace};

use crate::common::constants::{
    FULL_MARGIN, RESET_ENQUEUE_PTR, RESET_RETIRE_PTR, RESET_UPDATE_PTR,
};
use crate::common::error::FtqError;
use crate::common::mask::width_mask;
use crate::config::FtqConfig;
use crate::core::units::bru::GlobalHistory;
use crate::stats::FtqStats;

/// Fetch Target Queue state machine.
#[derive(Debug)]
pub struct FetchTargetQueue {
    /// Fixed-size entry ring.
    entries: Vec<FtqEntry>,
    /// Next free slot.
    enqueue_ptr: FtqIdx,
    /// Next entry to drain for predictor training.
    update_ptr: FtqIdx,
    /// Oldest entry not yet retired.
    retire_ptr: FtqIdx,
    /// Next enqueue starts from an empty history instead of its predecessor's.
    start_from_empty_ghist: bool,
    /// The next drained record is the reset lookback slot and must be suppressed.
    first_update: bool,
    /// Instruction slots per bundle.
    fetch_width: usize,
    /// Global history length in bits.
    ghist_length: usize,
    /// Lookups sampled last step, delivered on the next tick.
    lookup_latch: Vec<Option<LookupResponse>>,
    /// Activity counters.
    stats: FtqStats,
}

impl FetchTargetQueue {
    /// Creates a queue in its reset state.
    ///
    /// The configuration is expected to have passed [`FtqConfig::validate`].
    pub fn new(config: &FtqConfig) -> Self {
        Self {
            entries: vec![FtqEntry::default(); config.num_entries],
            enqueue_ptr: FtqIdx(RESET_ENQUEUE_PTR),
            update_ptr: FtqIdx(RESET_UPDATE_PTR),
            retire_ptr: FtqIdx(RESET_RETIRE_PTR),
            start_from_empty_ghist: true,
            first_update: true,
            fetch_width: config.fetch_width,
            ghist_length: config.ghist_length,
            lookup_latch: vec![None; config.lookup_ports],
            stats: FtqStats::default(),
        }
    }

    /// Returns every cursor and latch to the reset state. Statistics are kept.
    pub fn reset(&mut self) {
        self.entries.fill(FtqEntry::default());
        self.enqueue_ptr = FtqIdx(RESET_ENQUEUE_PTR);
        self.update_ptr = FtqIdx(RESET_UPDATE_PTR);
        self.retire_ptr = FtqIdx(RESET_RETIRE_PTR);
        self.start_from_empty_ghist = true;
        self.first_update = true;
        self.lookup_latch.fill(None);
    }

    /// Number of ring slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of lookup ports.
    #[inline]
    pub fn lookup_ports(&self) -> usize {
        self.lookup_latch.len()
    }

    /// Next free slot.
    #[inline]
    pub const fn enqueue_ptr(&self) -> FtqIdx {
        self.enqueue_ptr
    }

    /// Next entry awaiting predictor training.
    #[inline]
    pub const fn update_ptr(&self) -> FtqIdx {
        self.update_ptr
    }

    /// Oldest entry not yet retired.
    #[inline]
    pub const fn retire_ptr(&self) -> FtqIdx {
        self.retire_ptr
    }

    /// Slots held between the update cursor and the enqueue cursor.
    #[inline]
    pub fn occupancy(&self) -> usize {
        self.update_ptr.distance_to(self.enqueue_ptr, self.capacity())
    }

    /// Returns true if enqueue must stall.
    ///
    /// Full when advancing the enqueue cursor by one or two slots would reach
    /// the update cursor.
    #[inline]
    pub fn is_full(&self) -> bool {
        let n = self.capacity();
        (1..=FULL_MARGIN).any(|k| self.enqueue_ptr.wrap_add(k, n) == self.update_ptr)
    }

    /// Enqueue readiness; the complement of [`is_full`](Self::is_full).
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.is_full()
    }

    /// Activity counters.
    #[inline]
    pub const fn stats(&self) -> &FtqStats {
        &self.stats
    }

    /// Whether `idx` lies in `[from, enqueue_ptr)`.
    #[inline]
    fn in_window(&self, from: FtqIdx, idx: FtqIdx) -> bool {
        within(idx, from, self.enqueue_ptr, self.entries.len(), false)
    }

    /// Checks a step's indices against the live window each input will meet
    /// in [`tick`](Self::tick), without applying anything.
    ///
    /// Cursors are projected through the step in priority order: redirects
    /// must land in `[retire, enqueue)`, retires in `[retire, enqueue]` after
    /// the step's enqueue, and lookups in `[update, enqueue)` after the
    /// step's drain. Corrections may target any slot; late ones are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FtqError::OutOfWindow`] for the first index that falls outside.
    pub fn check_window(&self, inputs: &FtqInputs) -> Result<(), FtqError> {
        let n = self.capacity();
        let mut enqueue = self.enqueue_ptr;
        let mut retire = self.retire_ptr;
        let mut update = self.update_ptr;

        let out = |input, idx, from, to| FtqError::OutOfWindow {
            input,
            idx,
            from,
            to,
        };

        if let Some(r) = inputs.redirect {
            if !within(r.idx, retire, enqueue, n, false) {
                return Err(out("redirect", r.idx, retire, enqueue));
            }
            enqueue = r.idx.wrap_inc(n);
        } else if inputs.enqueue.is_some() && self.is_ready() {
            enqueue = enqueue.wrap_inc(n);
        }

        if let Some(idx) = inputs.retire {
            if !within(idx, retire, enqueue, n, true) {
                return Err(out("retire", idx, retire, enqueue));
            }
            retire = idx;
        }

        if update != retire && update.wrap_inc(n) != enqueue {
            update = update.wrap_inc(n);
        }

        match inputs
            .lookups
            .iter()
            .find(|req| !within(req.idx, update, enqueue, n, false))
        {
            Some(req) => Err(out("lookup", req.idx, update, enqueue)),
            None => Ok(()),
        }
    }

    /// Stored entry at `idx`.
    #[inline]
    pub fn entry(&self, idx: FtqIdx) -> &FtqEntry {
        &self.entries[idx.0]
    }

    /// Writes `bundle` at the enqueue cursor and returns its index.
    ///
    /// The entry's history extends the previous slot's history with that
    /// slot's current outcome, unless the empty-history latch is armed.
    ///
    /// # Errors
    ///
    /// Returns [`FtqError::Full`] when the readiness gate is low; the queue
    /// is left untouched.
    pub fn enqueue(&mut self, bundle: FetchBundle) -> Result<FtqIdx, FtqError> {
        if self.is_full() {
            self.stats.enqueue_stalls += 1;
            return Err(FtqError::Full {
                enqueue: self.enqueue_ptr,
                update: self.update_ptr,
            });
        }
        debug_assert!(
            bundle.cfi_idx.is_none_or(|i| (i as usize) < self.fetch_width),
            "cfi_idx beyond fetch width"
        );
        debug_assert!(
            (bundle.br_mask | bundle.jal_mask) & !width_mask(self.fetch_width) == 0,
            "slot mask beyond fetch width"
        );

        let n = self.capacity();
        let idx = self.enqueue_ptr;
        let ghist = if self.start_from_empty_ghist {
            GlobalHistory::empty(self.ghist_length)
        } else {
            self.entries[idx.wrap_dec(n).0].next_ghist()
        };

        self.entries[idx.0] = FtqEntry::from_bundle(&bundle, ghist);
        self.start_from_empty_ghist = false;
        self.enqueue_ptr = idx.wrap_inc(n);

        self.stats.enqueues += 1;
        self.stats.sample_occupancy(self.occupancy());
        trace!(idx = idx.0, pc = bundle.pc, ghist = ghist.bits(), "ftq enqueue");
        Ok(idx)
    }

    /// Immediate read of slot `idx` and its neighbours.
    ///
    /// Execution units see this through [`tick`](Self::tick) with one step
    /// of latency.
    pub fn lookup(&self, idx: FtqIdx) -> LookupResponse {
        debug_assert!(
            self.in_window(self.update_ptr, idx),
            "lookup of dead slot {idx}"
        );
        let next = idx.wrap_inc(self.capacity());
        LookupResponse {
            idx,
            entry: self.entries[idx.0],
            next_pc: self.entries[next.0].fetch_pc,
            next_valid: next != self.enqueue_ptr,
            retire_pc: self.entries[self.retire_ptr.0].fetch_pc,
        }
    }

    /// Moves the retire cursor to `idx`.
    ///
    /// The commit stage guarantees `idx` is at or beyond the current cursor
    /// in ring order; regressions are not detected in release builds.
    pub fn retire(&mut self, idx: FtqIdx) {
        let n = self.capacity();
        debug_assert!(
            self.retire_ptr.distance_to(idx, n) <= self.retire_ptr.distance_to(self.enqueue_ptr, n),
            "retire to {idx} outside [{}, {}]",
            self.retire_ptr,
            self.enqueue_ptr
        );
        self.retire_ptr = idx;
        self.stats.retires += 1;
    }

    /// Discards every bundle after `idx` and resumes enqueue at `idx + 1`.
    ///
    /// With `flush_history` the next enqueue starts from an empty history.
    pub fn redirect(&mut self, idx: FtqIdx, flush_history: bool) {
        debug_assert!(
            self.in_window(self.retire_ptr, idx),
            "redirect to {idx} outside [{}, {})",
            self.retire_ptr,
            self.enqueue_ptr
        );
        let old = self.enqueue_ptr;
        self.enqueue_ptr = idx.wrap_inc(self.capacity());
        if flush_history {
            self.start_from_empty_ghist = true;
            self.stats.history_flushes += 1;
        }
        self.stats.redirects += 1;
        debug!(
            idx = idx.0,
            flush_history,
            discarded = self.enqueue_ptr.distance_to(old, self.capacity()),
            "ftq redirect"
        );
    }

    /// Records the resolved CFI of the bundle at `idx`.
    ///
    /// Visible to training only while `idx` has not been drained yet; a late
    /// correction still rewrites the (dead) slot but is never trained on.
    pub fn correct(&mut self, idx: FtqIdx, cfi_idx: u32, taken: bool) {
        debug_assert!(idx.0 < self.capacity(), "correction index {idx} out of range");
        debug_assert!((cfi_idx as usize) < self.fetch_width, "cfi_idx beyond fetch width");

        if !self.in_window(self.update_ptr, idx) {
            self.stats.late_corrections += 1;
            debug!(idx = idx.0, update = self.update_ptr.0, "ftq correction after drain, dropped");
        }

        let entry = &mut self.entries[idx.0];
        entry.cfi_idx = Some(cfi_idx);
        entry.cfi_mispredicted = true;
        entry.cfi_taken = taken;
        self.stats.corrections += 1;
        debug!(idx = idx.0, cfi_idx, taken, "ftq correction");
    }

    /// Drains at most one predictor training record.
    ///
    /// Idle when training has caught up with retire, or when the next entry
    /// to train is the youngest one (its successor PC is not known yet).
    pub fn drain_update(&mut self) -> Option<BpdUpdate> {
        let n = self.capacity();
        let next = self.update_ptr.wrap_inc(n);
        if self.update_ptr == self.retire_ptr || next == self.enqueue_ptr {
            return None;
        }

        let idx = self.update_ptr;
        let mut update =
            BpdUpdate::from_entry(idx, &self.entries[idx.0], self.entries[next.0].fetch_pc);
        update.valid &= !self.first_update;

        self.update_ptr = next;
        self.first_update = false;

        self.stats.updates_drained += 1;
        if update.valid {
            self.stats.updates_valid += 1;
        }
        trace!(
            idx = idx.0,
            valid = update.valid,
            target = update.target,
            mispredicted = update.cfi_mispredicted,
            "ftq training update"
        );
        Some(update)
    }

    /// Advances the queue by one step.
    ///
    /// Inputs are applied in priority order: redirect, correction, enqueue
    /// (dropped if a redirect fired), retire, one training drain, and
    /// finally lookup sampling. Lookup responses are returned on the
    /// following tick.
    ///
    /// # Errors
    ///
    /// Returns [`FtqError::LookupPort`] if a lookup names a port the queue
    /// does not have; nothing is applied in that case.
    pub fn tick(&mut self, inputs: FtqInputs) -> Result<FtqOutputs, FtqError> {
        let ports = self.lookup_ports();
        if let Some(bad) = inputs.lookups.iter().find(|req| req.port >= ports) {
            return Err(FtqError::LookupPort {
                port: bad.port,
                ports,
            });
        }

        let ready = self.is_ready();
        let lookups = std::mem::replace(&mut self.lookup_latch, vec![None; ports]);
        self.stats.steps += 1;

        if let Some(r) = inputs.redirect {
            self.redirect(r.idx, r.flush_history);
        }

        if let Some(c) = inputs.correction {
            self.correct(c.idx, c.cfi_idx, c.taken);
        }

        let enqueue_ack = match inputs.enqueue {
            Some(bundle) if inputs.redirect.is_some() => {
                self.stats.enqueues_squashed += 1;
                debug!(pc = bundle.pc, "ftq enqueue squashed by redirect");
                None
            }
            Some(bundle) => match self.enqueue(bundle) {
                Ok(idx) => Some(idx),
                Err(e) => {
                    debug!(pc = bundle.pc, "{e}");
                    None
                }
            },
            None => None,
        };

        if let Some(idx) = inputs.retire {
            self.retire(idx);
        }

        let bpd_update = self.drain_update();

        for req in &inputs.lookups {
            self.lookup_latch[req.port] = Some(self.lookup(req.idx));
        }
        self.stats.lookups += lookups.iter().flatten().count() as u64;

        Ok(FtqOutputs {
            ready,
            enqueue_ack,
            lookups,
            bpd_update,
        })
    }
}

/// Whether `idx` lies in `[from, to)`, or `[from, to]` when `inclusive`.
#[inline]
const fn within(idx: FtqIdx, from: FtqIdx, to: FtqIdx, capacity: usize, inclusive: bool) -> bool {
    if idx.0 >= capacity {
        return false;
    }
    let offset = from.distance_to(idx, capacity);
    let span = from.distance_to(to, capacity);
    offset < span || (inclusive && offset == span)
}
