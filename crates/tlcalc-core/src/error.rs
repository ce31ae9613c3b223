//! Error type for scenario validation and the probability engine.

use thiserror::Error;

/// Errors surfaced by [`crate::calc`] and its building blocks.
///
/// Everything except `DegenerateStage` and `TableTooLarge` is a malformed-input
/// error raised before any preprocessing happens. A budget shortfall is not an
/// error: it yields probability 0.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TlError {
    #[error("scenario has no stages")]
    EmptyScenario,

    #[error("stage {stage}: no checkpoints")]
    EmptyStage { stage: usize },

    #[error("stage {stage}: {probs} probabilities but {times} failure times")]
    LengthMismatch {
        stage: usize,
        probs: usize,
        times: usize,
    },

    #[error("stage {stage}, checkpoint {checkpoint}: probability {value}% is outside 0..=100")]
    ProbabilityOutOfRange {
        stage: usize,
        checkpoint: usize,
        value: f64,
    },

    #[error("stage {stage}: {field} must be >= 0 (got {value})")]
    NegativeTime {
        stage: usize,
        field: &'static str,
        value: f64,
    },

    #[error("stage {stage}: {field} is not a finite number")]
    NonFinite { stage: usize, field: &'static str },

    #[error("threshold must be a positive, finite duration (got {0})")]
    InvalidThreshold(f64),

    #[error("fps must be a positive, finite number (got {0})")]
    InvalidFps(f64),

    #[error("restart delay must be >= 0 and finite (got {0})")]
    InvalidRestartDelay(f64),

    #[error("invalid clock value {input:?}: {reason}")]
    InvalidClock { input: String, reason: &'static str },

    /// The stage (almost) never completes: `q_succ` is 0 or so small that the
    /// expected time is not a finite number.
    #[error("stage {stage}: straight-through success probability is too small; expected time is not finite")]
    DegenerateStage { stage: usize },

    #[error("DP table of {cells} cells exceeds the limit of {limit}; lower fps or the threshold")]
    TableTooLarge { cells: u128, limit: usize },
}

pub type Result<T> = std::result::Result<T, TlError>;
