//! Probability that a chain of retried stages finishes within a time limit,
//! plus the unconditional expected completion time.

pub mod config;
pub mod logging;

pub mod calc;
pub mod engine;
pub mod error;
pub mod scenario;
pub mod stage;
pub mod threshold;
pub mod tickets;

pub use calc::{
    calculate_tl_stats, calculate_tl_stats_with, completion_curve, CalcOptions, CompletionCurve,
    TlStats,
};
pub use error::TlError;
pub use stage::Stage;
pub use threshold::Threshold;
