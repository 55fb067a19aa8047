// src/cli/dispatcher.rs

use crate::cli::args::{Cli, Commands};
use crate::cli::handlers::{self, commons};
use anyhow::Result;

/// Routes a parsed command line to its handler.
///
/// The runner is built once, up front, so a property problem (unreadable
/// file, malformed TOML, bad `-P` definition) fails before any handler runs.
pub fn dispatch(cli: Cli) -> Result<()> {
    let runner = commons::build_runner(&cli)?;
    match cli.command {
        Commands::Package(args) => handlers::package::handle(&runner, &args),
        Commands::Lint(args) => handlers::lint::handle(&runner, &args),
        Commands::Template(args) => handlers::template::handle(&runner, &args),
        Commands::Exec(args) => handlers::exec::handle(&runner, &args),
    }
}
