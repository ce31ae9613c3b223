//! CLI command handlers. Each command is in its own file.

mod completions;
mod curve;
mod eval;
mod sample;

pub use completions::{run_completions, run_man};
pub use curve::run_curve;
pub use eval::run_eval;
pub use sample::run_sample;
