//! # Unit Components
//!
//! Suites for each part of the model: configuration, global history, the
//! queue's operations, the simulator and statistics.


/// Global history update rules.
pub mod ghist;
