// src/bin/helmrun.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use helmrun::cli::{args::Cli, dispatcher};

/// The main entry point of the `helmrun` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {cli:?}");
    dispatcher::dispatch(cli)
}
