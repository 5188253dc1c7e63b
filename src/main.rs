mod cli;
mod config;
mod convert;
mod cv_cmd;
mod load;
mod logging;
mod timing_cmd;
mod tune_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Cv(args) => cv_cmd::run(args),
        Command::Tune(args) => tune_cmd::run(args),
        Command::Timing(args) => timing_cmd::run(args),
    }
}
