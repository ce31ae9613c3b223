use tlcalc_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(err) = logging::init() {
        eprintln!("tlcalc: logging disabled: {err:#}");
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("tlcalc error: {:#}", err);
        std::process::exit(1);
    }
}
