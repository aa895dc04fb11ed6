//! Simulation driver and stimulus loading.
//!
//! Provides the JSON stimulus format and the step-driven simulator that
//! replays it through the queue.

/// Step-driven simulator wiring the queue to a predictor.
pub mod simulator;

/// JSON stimulus format and input validation.
pub mod stimulus;

pub use simulator::{Simulator, replay};
pub use stimulus::{Stimulus, load_stimulus};
