//! Simulator: owns the queue and the branch predictor it trains.
//!
//! Each step feeds one set of collaborator inputs to the queue and forwards
//! the valid training record, if any, to the predictor.

use tracing::debug;

use super::stimulus::{Stimulus, check_inputs};
use crate::common::error::SimError;
use crate::config::{Config, FtqConfig};
use crate::core::pipeline::ftq::{FetchTargetQueue, FtqInputs, FtqOutputs};
use crate::core::units::bru::BpdTrainer;
use crate::stats::FtqStats;

/// Step-driven FTQ simulator.
#[derive(Debug)]
pub struct Simulator<T: BpdTrainer> {
    ftq: FetchTargetQueue,
    trainer: T,
    config: FtqConfig,
    trace_updates: bool,
}

impl<T: BpdTrainer> Simulator<T> {
    /// Creates a simulator with a fresh queue.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the configuration is invalid.
    pub fn new(config: &Config, trainer: T) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            ftq: FetchTargetQueue::new(&config.ftq),
            trainer,
            config: config.ftq.clone(),
            trace_updates: config.general.trace_updates,
        })
    }

    /// Advances one step.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Stimulus`] if the inputs do not fit the queue's
    /// shape or name a slot outside its live window.
    pub fn step(&mut self, inputs: FtqInputs) -> Result<FtqOutputs, SimError> {
        let step = self.ftq.stats().steps as usize;
        check_inputs(step, &inputs, &self.config)?;
        self.ftq
            .check_window(&inputs)
            .map_err(|e| SimError::Stimulus {
                step,
                reason: e.to_string(),
            })?;

        let outputs = self.ftq.tick(inputs)?;
        if let Some(update) = outputs.bpd_update.as_ref().filter(|u| u.valid) {
            self.trainer.train(update);
        }
        if self.trace_updates {
            debug!(
                step,
                ready = outputs.ready,
                ack = ?outputs.enqueue_ack,
                update = ?outputs.bpd_update.map(|u| u.ftq_idx),
                "ftq step"
            );
        }
        Ok(outputs)
    }

    /// Runs every step of `steps`, collecting the outputs.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn run(
        &mut self,
        steps: impl IntoIterator<Item = FtqInputs>,
    ) -> Result<Vec<FtqOutputs>, SimError> {
        steps.into_iter().map(|inputs| self.step(inputs)).collect()
    }

    /// The queue being driven.
    pub const fn ftq(&self) -> &FetchTargetQueue {
        &self.ftq
    }

    /// The predictor receiving training records.
    pub const fn trainer(&self) -> &T {
        &self.trainer
    }

    /// Queue statistics.
    pub const fn stats(&self) -> &FtqStats {
        self.ftq.stats()
    }

    /// Consumes the simulator, returning the predictor.
    pub fn into_trainer(self) -> T {
        self.trainer
    }
}

/// Builds a simulator from a stimulus and replays all of its steps.
///
/// # Errors
///
/// Returns the first configuration or stimulus error encountered.
pub fn replay<T: BpdTrainer>(
    stimulus: Stimulus,
    trainer: T,
) -> Result<(Simulator<T>, Vec<FtqOutputs>), SimError> {
    let mut sim = Simulator::new(&stimulus.config, trainer)?;
    let outputs = sim.run(stimulus.steps)?;
    Ok((sim, outputs))
}
