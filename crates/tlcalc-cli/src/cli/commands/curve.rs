//! `tlcalc curve <file>` – cumulative completion probability over time.

use anyhow::{bail, Result};
use std::path::Path;
use tlcalc_core::completion_curve;
use tlcalc_core::config::TlConfig;
use tlcalc_core::scenario::Scenario;

use crate::cli::format::{format_clock, format_percent};
use crate::cli::RunArgs;

/// Most rows `curve` will print; a finer `--step` is rejected.
pub const MAX_CURVE_ROWS: u64 = 100_000;

/// Sample times from the fastest possible finish up to `end`, `step` apart; `end` is always included.
pub fn sample_times(start: f64, end: f64, step: f64) -> Result<impl Iterator<Item = f64>> {
    let rows = if start > end {
        0
    } else {
        let steps = ((end - start) / step - 1e-9).ceil().max(0.0);
        if steps >= MAX_CURVE_ROWS as f64 {
            bail!(
                "--step {step} s would print more than {MAX_CURVE_ROWS} rows; use a larger step"
            );
        }
        steps as u64 + 1
    };
    Ok((0..rows).map(move |i| {
        if i + 1 == rows {
            end
        } else {
            start + step * i as f64
        }
    }))
}

pub fn run_curve(cfg: &TlConfig, path: &Path, run: &RunArgs, step: f64) -> Result<()> {
    if !step.is_finite() || step <= 0.0 {
        bail!("--step must be a positive number of seconds (got {step})");
    }
    let mut scenario = Scenario::load_from_path(path)?;
    run.apply(&mut scenario);
    let opts = scenario.calc_options(cfg)?;
    let curve = completion_curve(&scenario.stages, &opts)?;

    println!("Expected time: {:.2} s", curve.expected_time);
    let end = opts.threshold.as_secs();
    let start = curve.min_frames as f64 / curve.fps;
    if curve.cumulative.is_empty() {
        println!(
            "The success path alone ({}) exceeds the time limit ({}).",
            format_clock(start),
            format_clock(end)
        );
        return Ok(());
    }

    let times = sample_times(start, end, step)?;
    println!("{:>12}  {:>12}", "TIME", "P(DONE)");
    for t in times {
        println!("{:>12}  {:>12}", format_clock(t), format_percent(curve.at_secs(t)));
    }
    Ok(())
}
