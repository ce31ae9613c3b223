//! `tlcalc eval <file>` – evaluate a scenario file.

use anyhow::Result;
use std::path::Path;
use tlcalc_core::config::TlConfig;
use tlcalc_core::scenario::{Evaluation, Scenario};

use crate::cli::format::{format_clock, format_percent};
use crate::cli::RunArgs;

pub fn print_evaluation(eval: &Evaluation) {
    let limit = format_clock(eval.threshold_secs);
    match eval.tickets {
        Some(n) => {
            println!(
                "Within {limit} (one ticket): {}",
                format_percent(eval.stats.probability)
            );
            println!(
                "Within any of {n} ticket(s):  {}",
                format_percent(eval.overall_probability)
            );
        }
        None => println!("Within {limit}: {}", format_percent(eval.stats.probability)),
    }
    println!("Expected time: {:.2} s", eval.stats.expected_time);
    if eval.stats.max_waste_frames < 0 {
        println!("Note: the success path alone exceeds the time limit.");
    }
}

pub fn run_eval(
    cfg: &TlConfig,
    path: &Path,
    run: &RunArgs,
    tickets: Option<u32>,
    json: bool,
) -> Result<()> {
    let mut scenario = Scenario::load_from_path(path)?;
    run.apply(&mut scenario);
    if tickets.is_some() {
        scenario.tickets = tickets;
    }

    let eval = scenario.evaluate(cfg)?;
    tracing::info!(
        path = %path.display(),
        probability = eval.overall_probability,
        "eval finished"
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        print_evaluation(&eval);
    }
    Ok(())
}
