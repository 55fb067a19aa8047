// src/cli/handlers/commons.rs

// Shared plumbing used by every handler: property loading and runner setup.

use crate::cli::args::Cli;
use crate::constants::PROJECT_PROPERTIES_FILENAME;
use crate::core::context::BuildContext;
use crate::core::properties::{self, PropertyStore};
use crate::core::runner::HelmRunner;
use anyhow::{Context, Result, anyhow};
use colored::Colorize;

/// Builds the [`HelmRunner`] for this process: user properties, project
/// properties, `-P` definitions, working directory and build directory.
pub fn build_runner(cli: &Cli) -> Result<HelmRunner> {
    let defines = parse_defines(&cli.defines)?;

    let working_dir = std::env::current_dir().context("Could not determine working directory.")?;
    let project_file = cli
        .properties
        .clone()
        .unwrap_or_else(|| working_dir.join(PROJECT_PROPERTIES_FILENAME));
    let user_file = if cli.no_user_properties {
        None
    } else {
        properties::user_properties_file()
    };

    let store = PropertyStore::load(user_file.as_deref(), Some(&project_file), &defines)
        .context("Failed to load properties.")?;

    let build_dir = cli
        .build_dir
        .clone()
        .unwrap_or_else(|| working_dir.join("build"));

    Ok(HelmRunner::new(BuildContext::new(
        store,
        build_dir,
        working_dir,
    )))
}

/// Splits `key=value` definitions, rejecting anything without a key.
pub fn parse_defines(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| {
                    anyhow!(
                        "Invalid property definition '{}'. Expected {}.",
                        entry.cyan(),
                        "key=value".green()
                    )
                })
        })
        .collect()
}

/// Prints a finished command's captured stdout, if any.
pub fn print_output(stdout: &str) {
    let trimmed = stdout.trim_end();
    if !trimmed.is_empty() {
        println!("{trimmed}");
    }
}

// MARK: --- UNIT TESTS ---
