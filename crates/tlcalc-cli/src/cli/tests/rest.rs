//! Tests for sample, completions and man.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

#[test]
fn cli_parse_sample() {
    match parse(&["tlcalc", "sample"]) {
        CliCommand::Sample { json } => assert!(!json),
        _ => panic!("expected Sample"),
    }
    match parse(&["tlcalc", "sample", "--json"]) {
        CliCommand::Sample { json } => assert!(json),
        _ => panic!("expected Sample with --json"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["tlcalc", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
    assert!(Cli::try_parse_from(["tlcalc", "completions", "cmd.exe"]).is_err());
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["tlcalc", "man"]), CliCommand::Man));
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["tlcalc"]).is_err());
}
