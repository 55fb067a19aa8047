// src/core/runner.rs

use crate::core::composer;
use crate::core::context::BuildContext;
use crate::core::options::HelmOptions;
use crate::core::provider::ResolveError;
use crate::models::{ExecOutput, ExecSpec, Invocation};
use crate::system::invoker::{self, InvokeError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelmError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

/// Convenience front door for call sites: owns the global option set and the
/// build context, and turns a command plus a spec-configuration closure into
/// a finished invocation.
///
/// The runner itself adds no policy: every call composes one invocation and
/// runs it exactly once. Concurrent callers may share one runner; the option
/// set is only read at invocation time.
#[derive(Debug)]
pub struct HelmRunner {
    options: HelmOptions,
    context: BuildContext,
}

impl HelmRunner {
    pub fn new(context: BuildContext) -> Self {
        Self {
            options: HelmOptions::new(),
            context,
        }
    }

    pub fn with_options(options: HelmOptions, context: BuildContext) -> Self {
        Self { options, context }
    }

    pub fn options(&self) -> &HelmOptions {
        &self.options
    }

    /// Mutable access for the configuration phase. Callers are expected to
    /// stop mutating once invocations start.
    pub fn options_mut(&mut self) -> &mut HelmOptions {
        &mut self.options
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Composes without executing, for callers that want to inspect or defer.
    pub fn compose(&self, spec: &ExecSpec) -> Result<Invocation, ResolveError> {
        composer::compose(&self.options, spec, &self.context)
    }

    /// Builds a spec for `command` (and optional subcommand), lets `configure`
    /// fill in the details, then composes and runs it.
    pub fn exec<F>(
        &self,
        command: &str,
        subcommand: Option<&str>,
        configure: F,
    ) -> Result<ExecOutput, HelmError>
    where
        F: FnOnce(&mut ExecSpec),
    {
        let mut spec = ExecSpec::new(command);
        if let Some(subcommand) = subcommand {
            spec.subcommand(subcommand);
        }
        configure(&mut spec);
        let invocation = self.compose(&spec)?;
        Ok(invoker::invoke(&invocation)?)
    }

    /// The resolved chart output directory.
    pub fn output_dir(&self) -> Result<PathBuf, ResolveError> {
        Ok(self.options.resolve(&self.context)?.output_dir)
    }
}

// MARK: --- UNIT TESTS ---
