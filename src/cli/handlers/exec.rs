// src/cli/handlers/exec.rs

use crate::cli::args::ExecArgs;
use crate::cli::handlers::commons;
use crate::core::runner::HelmRunner;
use anyhow::Result;
use colored::Colorize;

/// Runs an arbitrary helm command, passing the remaining arguments through
/// verbatim.
pub fn handle(runner: &HelmRunner, args: &ExecArgs) -> Result<()> {
    let output = runner.exec(&args.command, args.sub.as_deref(), |spec| {
        spec.args(args.args.iter().cloned());
        spec.ignore_exit_value(args.ignore_exit_value);
    })?;

    commons::print_output(&output.stdout);
    if output.exit_code != 0 {
        // Only reachable with --ignore-exit-value.
        eprintln!(
            "{}",
            format!("helm exited with status {}.", output.exit_code).yellow()
        );
        if !output.stderr.trim().is_empty() {
            eprintln!("{}", output.stderr.trim_end());
        }
    }
    Ok(())
}
