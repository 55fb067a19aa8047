// src/models.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

/// The value carried by a named option in an [`ExecSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Rendered as `--flag value`.
    Value(String),
    /// Rendered as a bare `--flag` when `true`, omitted entirely when `false`.
    Switch(bool),
}

/// A single planned helm call: the command, its arguments and its overrides.
///
/// Built fresh by the caller for every invocation and consumed by the
/// composer. The builder methods mirror `std::process::Command`: they take
/// `&mut self` and return `&mut Self` so a configuration closure can chain
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecSpec {
    pub command: String,
    pub subcommand: Option<String>,
    pub args: Vec<String>,
    /// Named options in insertion order. Order is preserved all the way into
    /// the final argument vector.
    pub options: Vec<(String, OptionValue)>,
    pub working_dir: Option<PathBuf>,
    /// Additive environment entries. Applied last, so they win over anything
    /// derived from the global options.
    pub env: Vec<(String, String)>,
    pub extra_args: Vec<String>,
    /// When set, a non-zero exit status is reported as a normal result
    /// instead of an error.
    pub ignore_exit_value: bool,
}

impl ExecSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            subcommand: None,
            args: Vec::new(),
            options: Vec::new(),
            working_dir: None,
            env: Vec::new(),
            extra_args: Vec::new(),
            ignore_exit_value: false,
        }
    }

    pub fn subcommand(&mut self, subcommand: impl Into<String>) -> &mut Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    /// Appends one positional argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several positional arguments.
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a named option with a value, e.g. `option("--destination", dir)`.
    pub fn option(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options
            .push((name.into(), OptionValue::Value(value.into())));
        self
    }

    /// Appends a boolean flag, e.g. `flag("--strict", true)`.
    pub fn flag(&mut self, name: impl Into<String>, on: bool) -> &mut Self {
        self.options.push((name.into(), OptionValue::Switch(on)));
        self
    }

    /// Adds an environment entry for the spawned process.
    pub fn env(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.env.push((name.into(), value.into()));
        self
    }

    pub fn working_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Appends an argument placed after everything else in the vector.
    pub fn extra_arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.extra_args.push(arg.into());
        self
    }

    pub fn ignore_exit_value(&mut self, ignore: bool) -> &mut Self {
        self.ignore_exit_value = ignore;
        self
    }
}

/// The fully resolved, ready-to-launch form of one helm call.
///
/// Every entry is a literal string; nothing deferred remains. `env` is the
/// complete environment for the child process (inherited snapshot plus
/// overlays), so launching clears the ambient environment first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: PathBuf,
    pub ignore_exit_value: bool,
}

impl Invocation {
    /// The program to launch: the first element of the argument vector.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

/// Captured outcome of a finished helm process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}
