//! CLI for the tlcalc time-limit probability calculator.

mod commands;
mod format;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tlcalc_core::config;
use tlcalc_core::scenario::Scenario;

use commands::{run_completions, run_curve, run_eval, run_man, run_sample};

/// Top-level CLI for tlcalc.
#[derive(Debug, Parser)]
#[command(name = "tlcalc")]
#[command(
    about = "tlcalc: probability of finishing a chain of retried stages within a time limit",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides applied on top of a scenario file.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Time limit in hours.
    #[arg(long, conflicts_with = "clock")]
    pub hours: Option<f64>,

    /// Time limit as hh:mm:ss, mm:ss or ss.
    #[arg(long, value_name = "HH:MM:SS")]
    pub clock: Option<String>,

    /// Frames per second of the time axis.
    #[arg(long)]
    pub fps: Option<f64>,

    /// Seconds added to every failed attempt before it restarts.
    #[arg(long, value_name = "SECONDS")]
    pub restart_delay: Option<f64>,
}

impl RunArgs {
    /// Writes the given flags into the scenario; unset flags leave it untouched.
    pub fn apply(&self, scenario: &mut Scenario) {
        if let Some(clock) = &self.clock {
            scenario.threshold_clock = Some(clock.clone());
        } else if let Some(hours) = self.hours {
            scenario.threshold_hours = Some(hours);
            scenario.threshold_clock = None;
        }
        if let Some(fps) = self.fps {
            scenario.fps = Some(fps);
        }
        if let Some(delay) = self.restart_delay {
            scenario.restart_delay_secs = Some(delay);
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Evaluate a scenario file (.toml or .json).
    Eval {
        /// Path to the scenario file.
        path: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        /// Number of independent attempts at the time limit; success in any one counts.
        #[arg(long, value_name = "N")]
        tickets: Option<u32>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the cumulative completion probability over time.
    Curve {
        /// Path to the scenario file.
        path: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        /// Seconds between printed rows.
        #[arg(long, default_value = "60", value_name = "SECONDS")]
        step: f64,
    },

    /// Evaluate the built-in two-stage example and print the probability in percent.
    Sample {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Render the man page to stdout.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Eval {
                path,
                run,
                tickets,
                json,
            } => run_eval(&cfg, &path, &run, tickets, json)?,
            CliCommand::Curve { path, run, step } => run_curve(&cfg, &path, &run, step)?,
            CliCommand::Sample { json } => run_sample(&cfg, json)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
