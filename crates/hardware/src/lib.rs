//! Fetch Target Queue model library.
//!
//! This crate implements a step-accurate model of the Fetch Target Queue that
//! sits between the fetch pipeline and the backend of a speculative,
//! superscalar core:
//! 1. **Queue:** Ring buffer of in-flight fetch bundles with enqueue, retire and training cursors.
//! 2. **Recovery:** Redirects that discard wrong-path bundles and corrections of predicted CFIs.
//! 3. **Training:** An ordered, exactly-once stream of branch predictor updates.
//! 4. **History:** Per-bundle global history snapshots derived from the previous bundle.
//! 5. **Simulation:** JSON stimulus replay, configuration and statistics.

/// Common types and constants (errors, reset values, slot masks).
pub mod common;
/// Model configuration (defaults, validation).
pub mod config;
/// Queue and branch-unit models.
pub mod core;
/// Stimulus loading and the step-driven simulator.
pub mod sim;
/// Queue statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The queue state machine.
pub use crate::core::pipeline::ftq::FetchTargetQueue;
/// Step-driven simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
