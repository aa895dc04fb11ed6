//! Instruction pipeline structures.
//!
//! The frontend's bookkeeping of in-flight fetch bundles lives here:
//! 1. **FTQ:** The fetch target queue, its entries, indices, signals and training records.

/// Fetch target queue.
pub mod ftq;
