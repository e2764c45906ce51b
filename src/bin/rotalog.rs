//! `rotalog` binary: see `rotalog --help`.
//!
//! Usage:
//!   rotalog [OPTIONS] <MESSAGE>...       Append one message
//!   some-command | rotalog --stdin       Append each stdin line
//!   rotalog --config log.json --print-config

use clap::Parser;
use rotalog::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    run(&cli)
}
