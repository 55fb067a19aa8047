// src/cli/handlers/template.rs

use crate::cli::args::TemplateArgs;
use crate::cli::handlers::commons;
use crate::core::runner::HelmRunner;
use anyhow::Result;

/// Renders chart templates locally, to stdout or into a directory.
pub fn handle(runner: &HelmRunner, args: &TemplateArgs) -> Result<()> {
    let chart = args.chart_dir.to_string_lossy().into_owned();

    let output = runner.exec("template", None, |spec| {
        if let Some(dir) = &args.output_dir {
            spec.option("--output-dir", dir.to_string_lossy());
        }
        spec.arg(&chart);
    })?;

    commons::print_output(&output.stdout);
    Ok(())
}
