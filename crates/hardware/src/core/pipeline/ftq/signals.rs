//! Per-step input and output bundles of the queue.
//!
//! Each tick consumes one [`FtqInputs`] from the collaborators around the
//! queue (fetch, retire, recovery, branch resolution, execution units) and
//! produces one [`FtqOutputs`].

use serde::{Deserialize, Serialize};

use super::entry::{FetchBundle, FtqEntry};
use super::index::FtqIdx;
use super::update::BpdUpdate;

/// Recovery request: resume fetch after `idx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Last slot on the correct path.
    pub idx: FtqIdx,
    /// Restart the next enqueue from an empty history.
    #[serde(default)]
    pub flush_history: bool,
}

/// Branch resolution result overwriting a stored prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Slot whose prediction was wrong.
    pub idx: FtqIdx,
    /// Slot within the bundle of the resolved CFI.
    pub cfi_idx: u32,
    /// Resolved direction.
    pub taken: bool,
}

/// Lookup issued on one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    /// Port number, `0..lookup_ports`.
    #[serde(default)]
    pub port: usize,
    /// Slot to read.
    pub idx: FtqIdx,
}

/// Answer to a lookup, delivered one step after the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Slot that was read.
    pub idx: FtqIdx,
    /// Stored entry.
    pub entry: FtqEntry,
    /// PC of the following slot.
    pub next_pc: u64,
    /// Whether the following slot has been enqueued.
    pub next_valid: bool,
    /// PC of the slot at the retire cursor.
    pub retire_pc: u64,
}

/// Everything presented to the queue in one step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtqInputs {
    /// Bundle from fetch; honored only when ready and no redirect fires.
    #[serde(default)]
    pub enqueue: Option<FetchBundle>,
    /// New retire cursor from commit.
    #[serde(default)]
    pub retire: Option<FtqIdx>,
    /// Recovery request.
    #[serde(default)]
    pub redirect: Option<Redirect>,
    /// Misprediction correction.
    #[serde(default)]
    pub correction: Option<Correction>,
    /// Lookup requests; the last request on a port wins.
    #[serde(default)]
    pub lookups: Vec<LookupRequest>,
}

/// Everything the queue produces in one step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtqOutputs {
    /// Readiness gate as seen at the start of the step.
    pub ready: bool,
    /// Index assigned to this step's bundle, if it was accepted.
    pub enqueue_ack: Option<FtqIdx>,
    /// Responses to the previous step's lookups, one slot per port.
    pub lookups: Vec<Option<LookupResponse>>,
    /// Training record drained this step.
    pub bpd_update: Option<BpdUpdate>,
}
