//! Branch prediction unit (BRU) interfaces.
//!
//! The queue does not predict anything itself. This module holds the pieces
//! of the branch predictor it touches: the global history snapshot stored in
//! every entry, and the seam through which drained training records reach
//! the predictor.

pub use self::ghist::GlobalHistory;

use crate::core::pipeline::ftq::BpdUpdate;

/// Speculative global history register and its per-bundle update function.
pub mod ghist;

/// Consumer of predictor training records.
///
/// Implemented by whatever branch predictor sits behind the queue. The
/// simulator calls `train` once per valid record, in enqueue order.
pub trait BpdTrainer {
    /// Trains the predictor on one resolved fetch bundle.
    fn train(&mut self, update: &BpdUpdate);
}

/// Trainer that records every update it receives.
#[derive(Clone, Debug, Default)]
pub struct UpdateLog {
    /// Received updates, oldest first.
    pub updates: Vec<BpdUpdate>,
}

impl BpdTrainer for UpdateLog {
    fn train(&mut self, update: &BpdUpdate) {
        self.updates.push(*update);
    }
}

impl<T: BpdTrainer + ?Sized> BpdTrainer for &mut T {
    fn train(&mut self, update: &BpdUpdate) {
        (**self).train(update);
    }
}
