//! Stage input records and preprocessing.
//!
//! A stage is one link of the chain: an attempt walks its checkpoints in
//! order and either fails at one of them (and restarts the stage) or passes
//! all of them and finishes after `success_time`.

mod frames;
mod params;

pub use frames::to_frames;
pub use params::{preprocess, Preprocessed, StageParams};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TlError};

/// Raw stage description as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Pass probability of each checkpoint, in percent (0..=100).
    pub probs: Vec<f64>,
    /// Elapsed time (seconds) at which a failure at each checkpoint is detected.
    pub times: Vec<f64>,
    /// Time (seconds) of a straight-through successful attempt.
    pub success_time: f64,
}

impl Stage {
    pub fn new(probs: Vec<f64>, times: Vec<f64>, success_time: f64) -> Self {
        Self {
            probs,
            times,
            success_time,
        }
    }

    /// Checks the shape and ranges of this stage. `index` is only used in errors.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.probs.is_empty() && self.times.is_empty() {
            return Err(TlError::EmptyStage { stage: index });
        }
        if self.probs.len() != self.times.len() {
            return Err(TlError::LengthMismatch {
                stage: index,
                probs: self.probs.len(),
                times: self.times.len(),
            });
        }
        if !self.success_time.is_finite() {
            return Err(TlError::NonFinite {
                stage: index,
                field: "success_time",
            });
        }
        if self.success_time < 0.0 {
            return Err(TlError::NegativeTime {
                stage: index,
                field: "success_time",
                value: self.success_time,
            });
        }
        for (k, (&p, &t)) in self.probs.iter().zip(&self.times).enumerate() {
            if !p.is_finite() {
                return Err(TlError::NonFinite {
                    stage: index,
                    field: "probs",
                });
            }
            if !(0.0..=100.0).contains(&p) {
                return Err(TlError::ProbabilityOutOfRange {
                    stage: index,
                    checkpoint: k,
                    value: p,
                });
            }
            if !t.is_finite() {
                return Err(TlError::NonFinite {
                    stage: index,
                    field: "times",
                });
            }
            if t < 0.0 {
                return Err(TlError::NegativeTime {
                    stage: index,
                    field: "times",
                    value: t,
                });
            }
        }
        Ok(())
    }
}

/// Validates every stage of a scenario, rejecting an empty chain.
pub fn validate_all(stages: &[Stage]) -> Result<()> {
    if stages.is_empty() {
        return Err(TlError::EmptyScenario);
    }
    stages
        .iter()
        .enumerate()
        .try_for_each(|(i, s)| s.validate(i))
}
