//! Core frontend models.
//!
//! This module contains the fetch target queue and the parts of the branch
//! unit it interacts with.

/// Instruction pipeline structures (fetch target queue).
pub mod pipeline;

/// Functional units (branch history and predictor training seam).
pub mod units;
