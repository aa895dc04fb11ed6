//! Stimulus files.
//!
//! A stimulus is a JSON document holding a configuration and one input
//! record per step:
//!
//! ```json
//! {
//!   "config": { "ftq": { "num_entries": 16 } },
//!   "steps": [
//!     { "enqueue": { "pc": 4096, "cfi_idx": 1, "br_mask": 2 } },
//!     { "enqueue": { "pc": 8192 }, "lookups": [ { "port": 0, "idx": 1 } ] },
//!     { "retire": 2, "correction": { "idx": 1, "cfi_idx": 1, "taken": false } },
//!     { "redirect": { "idx": 1, "flush_history": false } }
//!   ]
//! }
//! ```
//!
//! Records are checked against the configured queue before they reach it,
//! so malformed input is reported instead of tripping the queue's contracts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::SimError;
use crate::common::mask::width_mask;
use crate::config::{Config, FtqConfig};
use crate::core::pipeline::ftq::{FtqIdx, FtqInputs};

/// Configuration plus the per-step inputs to replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Stimulus {
    /// Queue and simulator configuration.
    #[serde(default)]
    pub config: Config,
    /// One record per step.
    #[serde(default)]
    pub steps: Vec<FtqInputs>,
}

impl Stimulus {
    /// Parses a stimulus from JSON text and validates its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] for malformed JSON and [`SimError::Config`]
    /// for an invalid configuration.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let stimulus: Self = serde_json::from_str(text)?;
        stimulus.config.validate()?;
        Ok(stimulus)
    }
}

/// Reads and parses a stimulus file.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, otherwise the
/// errors of [`Stimulus::from_json`].
pub fn load_stimulus(path: impl AsRef<Path>) -> Result<Stimulus, SimError> {
    let text = fs::read_to_string(path)?;
    Stimulus::from_json(&text)
}

/// Checks one step's inputs against the queue shape.
///
/// # Errors
///
/// Returns [`SimError::Stimulus`] naming the first field that does not fit.
pub fn check_inputs(step: usize, inputs: &FtqInputs, cfg: &FtqConfig) -> Result<(), SimError> {
    let fail = |reason: String| -> Result<(), SimError> { Err(SimError::Stimulus { step, reason }) };
    let idx_ok = |idx: FtqIdx| idx.0 < cfg.num_entries;
    let width = cfg.fetch_width;

    if let Some(bundle) = &inputs.enqueue {
        if let Some(cfi) = bundle.cfi_idx.filter(|&c| c as usize >= width) {
            return fail(format!("enqueue cfi_idx {cfi} >= fetch width {width}"));
        }
        let stray = (bundle.br_mask | bundle.jal_mask) & !width_mask(width);
        if stray != 0 {
            return fail(format!("enqueue slot mask {stray:#x} beyond fetch width {width}"));
        }
    }
    if let Some(idx) = inputs.retire.filter(|&i| !idx_ok(i)) {
        return fail(format!("retire index {idx} >= {}", cfg.num_entries));
    }
    if let Some(r) = inputs.redirect.filter(|r| !idx_ok(r.idx)) {
        return fail(format!("redirect index {} >= {}", r.idx, cfg.num_entries));
    }
    if let Some(c) = &inputs.correction {
        if !idx_ok(c.idx) {
            return fail(format!("correction index {} >= {}", c.idx, cfg.num_entries));
        }
        if c.cfi_idx as usize >= width {
            return fail(format!(
                "correction cfi_idx {} >= fetch width {width}",
                c.cfi_idx
            ));
        }
    }
    for req in &inputs.lookups {
        if req.port >= cfg.lookup_ports {
            return fail(format!(
                "lookup port {} >= {}",
                req.port, cfg.lookup_ports
            ));
        }
        if !idx_ok(req.idx) {
            return fail(format!("lookup index {} >= {}", req.idx, cfg.num_entries));
        }
    }
    Ok(())
}
