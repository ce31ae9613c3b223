//! Per-stage probability and frame parameters.

use crate::error::{Result, TlError};

use super::frames::to_frames;
use super::Stage;

/// Derived, read-only parameters of one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageParams {
    /// Probability that an attempt passes every checkpoint.
    pub q_succ: f64,
    /// Probability that an attempt fails at checkpoint k (and at no earlier one).
    pub q_fails: Vec<f64>,
    /// Frames lost before the restart after a failure at checkpoint k.
    pub t_fails: Vec<u64>,
    /// Frames of a straight-through success.
    pub succ_frames: u64,
}

impl StageParams {
    /// Failure mass of checkpoints that cost no frames at all.
    ///
    /// Such failures loop back to the same frame offset.
    pub fn zero_frame_mass(&self) -> f64 {
        self.q_fails
            .iter()
            .zip(&self.t_fails)
            .filter(|&(_, &t)| t == 0)
            .map(|(&q, _)| q)
            .sum()
    }
}

/// Output of [`preprocess`]: per-stage parameters plus scenario totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    pub stages: Vec<StageParams>,
    /// Unconditional expected time to finish every stage, in seconds.
    pub total_expected_time: f64,
    /// Sum of every stage's success frames: the fastest possible run.
    pub total_min_frames: u64,
}

/// Converts validated stages into [`StageParams`] and accumulates totals.
///
/// `restart_delay_secs` is added to every failure time, both in frames and in
/// the expected-time formula. Callers validate the stages first.
pub fn preprocess(stages: &[Stage], fps: f64, restart_delay_secs: f64) -> Result<Preprocessed> {
    let restart_frames = to_frames(restart_delay_secs, fps);
    let mut out = Vec::with_capacity(stages.len());
    let mut total_expected_time = 0.0;
    let mut total_min_frames = 0u64;

    for (index, stage) in stages.iter().enumerate() {
        let pass: Vec<f64> = stage.probs.iter().map(|p| p / 100.0).collect();
        let q_succ = pass.iter().fold(1.0, |acc, p| acc * p);

        let mut q_fails = Vec::with_capacity(pass.len());
        let mut running = 1.0;
        for p in &pass {
            q_fails.push(running * (1.0 - p));
            running *= p;
        }

        if q_succ == 0.0 {
            return Err(TlError::DegenerateStage { stage: index });
        }

        let t_fails: Vec<u64> = stage
            .times
            .iter()
            .map(|&t| to_frames(t, fps).saturating_add(restart_frames))
            .collect();
        let succ_frames = to_frames(stage.success_time, fps);

        let expected_waste = q_fails
            .iter()
            .zip(&stage.times)
            .fold(0.0, |acc, (q, t)| acc + q * (t + restart_delay_secs));
        let contribution = stage.success_time + expected_waste / q_succ;
        total_expected_time += contribution;
        if !total_expected_time.is_finite() {
            return Err(TlError::DegenerateStage { stage: index });
        }
        total_min_frames = total_min_frames.saturating_add(succ_frames);

        tracing::debug!(
            stage = index,
            q_succ,
            succ_frames,
            expected = contribution,
            "stage preprocessed"
        );

        out.push(StageParams {
            q_succ,
            q_fails,
            t_fails,
            succ_frames,
        });
    }

    Ok(Preprocessed {
        stages: out,
        total_expected_time,
        total_min_frames,
    })
}
