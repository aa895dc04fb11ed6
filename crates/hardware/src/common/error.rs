//! Error definitions.
//!
//! The queue itself has almost no runtime failure modes: its contracts are
//! expressed as backpressure and trusted indices. This module defines:
//! 1. **Queue Errors:** The checked forms of the enqueue backpressure, port and index contracts.
//! 2. **Configuration Errors:** Violated bounds found by `Config::validate`.
//! 3. **Simulation Errors:** Stimulus loading and conversion failures surfaced to the CLI.

use thiserror::Error;

use crate::core::pipeline::ftq::FtqIdx;

/// Errors reported by the fetch target queue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FtqError {
    /// Enqueue attempted while the readiness gate was low.
    #[error("fetch target queue full (enqueue={enqueue}, update={update})")]
    Full {
        /// Enqueue cursor at the time of the attempt.
        enqueue: FtqIdx,
        /// Update cursor at the time of the attempt.
        update: FtqIdx,
    },

    /// A lookup named a port the queue does not have.
    #[error("lookup port {port} out of range ({ports} ports configured)")]
    LookupPort {
        /// Requested port.
        port: usize,
        /// Number of configured ports.
        ports: usize,
    },

    /// An index outside the live window it is checked against.
    #[error("{input} index {idx} outside live window {from}..{to}")]
    OutOfWindow {
        /// Input that carried the index.
        input: &'static str,
        /// Offending index.
        idx: FtqIdx,
        /// First slot of the window.
        from: FtqIdx,
        /// End of the window (exclusive, or inclusive for retire).
        to: FtqIdx,
    },
}

/// Configuration bounds violated by a [`Config`](crate::config::Config).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Queue too small to hold the lookback slot, the margin and one entry.
    #[error("ftq.num_entries must be at least {min}, got {got}")]
    TooFewEntries {
        /// Minimum supported queue depth.
        min: usize,
        /// Configured depth.
        got: usize,
    },

    /// Fetch width outside the range representable by slot masks.
    #[error("ftq.fetch_width must be in 1..={max}, got {got}")]
    FetchWidth {
        /// Maximum supported width.
        max: usize,
        /// Configured width.
        got: usize,
    },

    /// Global history length outside the history register.
    #[error("ftq.ghist_length must be in 1..={max}, got {got}")]
    HistoryLength {
        /// Maximum supported length.
        max: usize,
        /// Configured length.
        got: usize,
    },

    /// At least one lookup port is required.
    #[error("ftq.lookup_ports must be at least 1")]
    NoLookupPorts,
}

/// Failures while loading or replaying a stimulus.
#[derive(Debug, Error)]
pub enum SimError {
    /// Reading the stimulus file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The stimulus was not valid JSON for the expected schema.
    #[error("stimulus parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The embedded configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The queue rejected a request.
    #[error(transparent)]
    Ftq(#[from] FtqError),

    /// A stimulus record does not fit the configured queue.
    #[error("step {step}: {reason}")]
    Stimulus {
        /// Index of the offending step.
        step: usize,
        /// What was wrong with it.
        reason: String,
    },
}
