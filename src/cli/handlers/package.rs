// src/cli/handlers/package.rs

use crate::cli::args::PackageArgs;
use crate::cli::handlers::commons;
use crate::core::runner::HelmRunner;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

/// Packages a chart directory into the resolved output directory.
pub fn handle(runner: &HelmRunner, args: &PackageArgs) -> Result<()> {
    let output_dir = runner.output_dir()?;
    fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Could not create chart output directory '{}'.",
            output_dir.display()
        )
    })?;

    let destination = output_dir.to_string_lossy().into_owned();
    let chart = args.chart_dir.to_string_lossy().into_owned();

    let output = runner.exec("package", None, |spec| {
        spec.option("--destination", &destination);
        if let Some(version) = &args.version {
            spec.option("--version", version);
        }
        if let Some(app_version) = &args.app_version {
            spec.option("--app-version", app_version);
        }
        spec.arg(&chart);
    })?;

    commons::print_output(&output.stdout);
    println!(
        "{} Chart packaged into '{}'.",
        "✓".green(),
        output_dir.display()
    );
    Ok(())
}
