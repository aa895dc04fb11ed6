//! Common utilities and types used throughout the model.
//!
//! This module provides the building blocks shared by the queue, the branch
//! history logic and the simulator driver. It includes:
//! 1. **Constants:** Reset cursor values, the full margin and width limits.
//! 2. **Error Handling:** Queue, configuration and simulation error types.
//! 3. **Masks:** Helpers for per-slot branch and jump bitmasks.

/// Common constants used throughout the model.
pub mod constants;

/// Error types.
pub mod error;

/// Slot bitmask helpers.
pub mod mask;

pub use error::{ConfigError, FtqError, SimError};
