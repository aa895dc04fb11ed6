//! Global Model Constants.
//!
//! This module defines constants shared by the queue, the history logic and
//! configuration validation. It includes:
//! 1. **Ring Constants:** Reset cursor offsets and the enqueue safety margin.
//! 2. **Width Limits:** Upper bounds imposed by `u64` slot masks and history registers.

/// Reset value of the training (update) cursor.
pub const RESET_UPDATE_PTR: usize = 0;

/// Reset value of the retire cursor.
pub const RESET_RETIRE_PTR: usize = 0;

/// Reset value of the enqueue cursor.
///
/// Offset by one so the slot behind the first enqueue exists as the lookback
/// slot for history computation.
pub const RESET_ENQUEUE_PTR: usize = 1;

/// Number of slots kept free between the enqueue cursor and the update cursor.
///
/// The queue reports full when advancing the enqueue cursor by one or by
/// `FULL_MARGIN` slots would land on the update cursor.
pub const FULL_MARGIN: usize = 2;

/// Smallest queue that still has a usable slot after the margin and lookback slot.
pub const MIN_QUEUE_ENTRIES: usize = FULL_MARGIN + 2;

/// Widest fetch bundle representable by the `u64` branch/jump masks.
pub const MAX_FETCH_WIDTH: usize = 64;

/// Longest global history that fits the `u64` history register.
pub const MAX_GHIST_LENGTH: usize = 64;
