// src/cli/args.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// helmrun: drives the Helm CLI with build-scoped configuration.
#[derive(Parser, Debug)]
#[command(name = "helmrun", author, version, about)]
pub struct Cli {
    /// Path to the project property file. Defaults to `helmrun.toml` in the
    /// working directory.
    #[arg(long, global = true, value_name = "FILE")]
    pub properties: Option<PathBuf>,

    /// Set a property, overriding the property files (e.g. `-P helm.debug=true`).
    #[arg(short = 'P', long = "prop", global = true, value_name = "KEY=VALUE")]
    pub defines: Vec<String>,

    /// Build output root directory. Defaults to `build` in the working directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Do not read the user-level property file.
    #[arg(long, global = true)]
    pub no_user_properties: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package a chart directory into a versioned archive.
    Package(PackageArgs),
    /// Run the chart linter.
    Lint(LintArgs),
    /// Render chart templates locally.
    Template(TemplateArgs),
    /// Run an arbitrary helm command with the resolved global options.
    Exec(ExecArgs),
}

#[derive(Args, Debug, Default)]
pub struct PackageArgs {
    /// Path to the chart directory.
    pub chart_dir: PathBuf,

    /// Set the chart version before packaging.
    #[arg(long)]
    pub version: Option<String>,

    /// Set the appVersion on the chart before packaging.
    #[arg(long)]
    pub app_version: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct LintArgs {
    /// Path to the chart directory.
    pub chart_dir: PathBuf,

    /// Fail on lint warnings as well as errors.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Default)]
pub struct TemplateArgs {
    /// Path to the chart directory.
    pub chart_dir: PathBuf,

    /// Write rendered manifests into this directory instead of stdout.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ExecArgs {
    /// Optional subcommand, placed right after the command (e.g. `--sub add`
    /// with command `repo`).
    #[arg(long, value_name = "SUBCOMMAND")]
    pub sub: Option<String>,

    /// Treat a non-zero exit status as a normal result.
    #[arg(long)]
    pub ignore_exit_value: bool,

    /// The helm command to run.
    pub command: String,

    /// Arguments passed through to helm verbatim.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
