//! Fetch target queue statistics collection and reporting.
//!
//! This module tracks activity counters for the FTQ model. It provides:
//! 1. **Throughput:** Steps, enqueues, retires and peak occupancy.
//! 2. **Backpressure:** Enqueue stalls and enqueues discarded by a same-step redirect.
//! 3. **Recovery:** Redirects, history flushes, corrections and late (dropped) corrections.
//! 4. **Training:** Records drained, and how many were valid or suppressed.

use std::time::Instant;

use serde::Serialize;

/// FTQ statistics structure.
#[derive(Clone, Debug, Serialize)]
pub struct FtqStats {
    #[serde(skip)]
    start_time: Instant,
    /// Steps (ticks) executed.
    pub steps: u64,
    /// Bundles accepted into the queue.
    pub enqueues: u64,
    /// Enqueue requests refused because the queue was full.
    pub enqueue_stalls: u64,
    /// Enqueue requests ignored because a redirect fired the same step.
    pub enqueues_squashed: u64,
    /// Redirects applied.
    pub redirects: u64,
    /// Redirects that re-armed the empty-history latch.
    pub history_flushes: u64,
    /// Misprediction corrections applied.
    pub corrections: u64,
    /// Corrections whose target had already been drained for training.
    pub late_corrections: u64,
    /// Retire-pointer updates.
    pub retires: u64,
    /// Training records drained (valid or suppressed).
    pub updates_drained: u64,
    /// Drained records that were valid and forwarded to the predictor.
    pub updates_valid: u64,
    /// Lookup responses produced.
    pub lookups: u64,
    /// Highest number of slots held between the update and enqueue cursors.
    pub peak_occupancy: u64,
}

impl Default for FtqStats {
    /// Returns zeroed counters with the host clock started now.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            enqueues: 0,
            enqueue_stalls: 0,
            enqueues_squashed: 0,
            redirects: 0,
            history_flushes: 0,
            corrections: 0,
            late_corrections: 0,
            retires: 0,
            updates_drained: 0,
            updates_valid: 0,
            lookups: 0,
            peak_occupancy: 0,
        }
    }
}

impl FtqStats {
    /// Drained records whose valid flag was suppressed.
    pub const fn updates_suppressed(&self) -> u64 {
        self.updates_drained - self.updates_valid
    }

    /// Records a new occupancy sample, keeping the maximum.
    #[inline]
    pub fn sample_occupancy(&mut self, occupancy: usize) {
        self.peak_occupancy = self.peak_occupancy.max(occupancy as u64);
    }

    /// Prints all statistics to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let steps = self.steps.max(1);
        let stall_pct = (self.enqueue_stalls as f64 / steps as f64) * 100.0;
        let late_pct = if self.corrections > 0 {
            (self.late_corrections as f64 / self.corrections as f64) * 100.0
        } else {
            0.0
        };

        println!("\n==========================================================");
        println!("FETCH TARGET QUEUE STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_steps                {}", self.steps);
        println!("ftq.peak_occupancy       {}", self.peak_occupancy);
        println!("----------------------------------------------------------");
        println!("FLOW");
        println!("  enqueue.accepted       {}", self.enqueues);
        println!(
            "  enqueue.stalled        {} ({stall_pct:.2}% of steps)",
            self.enqueue_stalls
        );
        println!("  enqueue.squashed       {}", self.enqueues_squashed);
        println!("  retire.updates         {}", self.retires);
        println!("  lookup.responses       {}", self.lookups);
        println!("----------------------------------------------------------");
        println!("RECOVERY");
        println!("  redirects              {}", self.redirects);
        println!("  redirects.flush_ghist  {}", self.history_flushes);
        println!("  corrections            {}", self.corrections);
        println!(
            "  corrections.late       {} ({late_pct:.2}%)",
            self.late_corrections
        );
        println!("----------------------------------------------------------");
        println!("PREDICTOR TRAINING");
        println!("  bpd.drained            {}", self.updates_drained);
        println!("  bpd.valid              {}", self.updates_valid);
        println!("  bpd.suppressed         {}", self.updates_suppressed());
        println!("==========================================================");
    }
}
