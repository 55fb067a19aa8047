// src/cli/handlers/lint.rs

use crate::cli::args::LintArgs;
use crate::cli::handlers::commons;
use crate::core::runner::HelmRunner;
use anyhow::Result;
use colored::Colorize;

/// Runs the chart linter against a chart directory.
pub fn handle(runner: &HelmRunner, args: &LintArgs) -> Result<()> {
    let chart = args.chart_dir.to_string_lossy().into_owned();

    let output = runner.exec("lint", None, |spec| {
        spec.flag("--strict", args.strict);
        spec.arg(&chart);
    })?;

    commons::print_output(&output.stdout);
    println!("{} Lint passed for '{}'.", "✓".green(), chart.cyan());
    Ok(())
}
