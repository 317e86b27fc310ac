//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;


pub(super) fn parse(args: &[&str]) -> CliCommand {
    Cli::try_parse_from(args).unwrap().command
}

pub(super) fn parse_err(args: &[&str]) -> clap::Error {
    Cli::try_parse_from(args).unwrap_err()
}

#[test]
fn cli_parse_config() {
    match parse(&["figdl", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["figdl", "download"]).is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["figdl"]).is_err());
}
