// src/core/options.rs

use crate::constants::{
    DEFAULT_EXECUTABLE, DEFAULT_OUTPUT_SUBDIR, PROP_DEBUG, PROP_EXECUTABLE, PROP_EXTRA_ARGS,
    PROP_HOME, PROP_HOST, PROP_KUBE_CONFIG, PROP_KUBE_CONTEXT, PROP_OUTPUT_DIR,
    PROP_TIMEOUT_SECONDS,
};
use crate::core::context::BuildContext;
use crate::core::provider::{Provider, ResolveError, Source};
use std::path::PathBuf;

/// The build-scope bundle of options applied to every helm invocation.
///
/// Each slot is a deferred value: an explicit assignment wins, otherwise the
/// slot falls back to its `helm.*` property and then to its documented
/// default. One instance is shared by all invocations of a build and is
/// treated as read-only once invocations start.
#[derive(Debug, Clone)]
pub struct HelmOptions {
    /// Path or name of the helm executable. Defaults to `"helm"`.
    pub executable: Provider<String>,
    /// Enables helm's verbose output (`--debug`).
    pub debug: Provider<bool>,
    /// Helm home directory (`--home`).
    pub home: Provider<PathBuf>,
    /// Address of Tiller in `host:port` form; exported as `HELM_HOST`.
    pub host: Provider<String>,
    /// Name of the kubeconfig context (`--kube-context`).
    pub kube_context: Provider<String>,
    /// Path to the Kubernetes configuration file; exported as `KUBECONFIG`.
    pub kube_config: Provider<PathBuf>,
    /// Time in seconds to wait for any individual Kubernetes operation.
    pub timeout_seconds: Provider<u32>,
    /// Arguments appended to every invocation after everything else.
    pub extra_args: Provider<Vec<String>>,
    /// Base output directory for packaged charts.
    /// Defaults to `<build-dir>/helm/charts`.
    pub output_dir: Provider<PathBuf>,
}

impl Default for HelmOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl HelmOptions {
    pub fn new() -> Self {
        Self {
            executable: Provider::new("executable")
                .convention(Source::Property {
                    key: PROP_EXECUTABLE,
                    expand: true,
                })
                .convention(Source::Value(DEFAULT_EXECUTABLE.to_string())),
            debug: Provider::new("debug").convention(Source::Property {
                key: PROP_DEBUG,
                expand: false,
            }),
            home: Provider::new("home").convention(Source::Property {
                key: PROP_HOME,
                expand: true,
            }),
            host: Provider::new("host").convention(Source::Property {
                key: PROP_HOST,
                expand: false,
            }),
            kube_context: Provider::new("kubeContext").convention(Source::Property {
                key: PROP_KUBE_CONTEXT,
                expand: false,
            }),
            kube_config: Provider::new("kubeConfig").convention(Source::Property {
                key: PROP_KUBE_CONFIG,
                expand: true,
            }),
            timeout_seconds: Provider::new("timeoutSeconds").convention(Source::Property {
                key: PROP_TIMEOUT_SECONDS,
                expand: false,
            }),
            extra_args: Provider::new("extraArgs").convention(Source::Property {
                key: PROP_EXTRA_ARGS,
                expand: false,
            }),
            output_dir: Provider::new("outputDir")
                .convention(Source::Property {
                    key: PROP_OUTPUT_DIR,
                    expand: true,
                })
                .convention(Source::Computed(|ctx| {
                    Some(ctx.build_dir().join(DEFAULT_OUTPUT_SUBDIR))
                })),
        }
    }

    /// Forces resolution of every slot, surfacing the first error.
    pub fn resolve(&self, ctx: &BuildContext) -> Result<ResolvedOptions, ResolveError> {
        Ok(ResolvedOptions {
            executable: self
                .executable
                .resolve_or(ctx, DEFAULT_EXECUTABLE.to_string())?,
            debug: self.debug.resolve_or(ctx, false)?,
            home: self.home.resolve(ctx)?,
            host: self.host.resolve(ctx)?,
            kube_context: self.kube_context.resolve(ctx)?,
            kube_config: self.kube_config.resolve(ctx)?,
            timeout_seconds: self.timeout_seconds.resolve(ctx)?,
            timeout_is_explicit: self.timeout_seconds.is_set(),
            extra_args: self.extra_args.resolve_or(ctx, Vec::new())?,
            output_dir: self
                .output_dir
                .resolve_or(ctx, ctx.build_dir().join(DEFAULT_OUTPUT_SUBDIR))?,
        })
    }
}

/// Plain-data snapshot of a fully resolved [`HelmOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub executable: String,
    pub debug: bool,
    pub home: Option<PathBuf>,
    pub host: Option<String>,
    pub kube_context: Option<String>,
    pub kube_config: Option<PathBuf>,
    pub timeout_seconds: Option<u32>,
    pub timeout_is_explicit: bool,
    pub extra_args: Vec<String>,
    pub output_dir: PathBuf,
}

// MARK: --- UNIT TESTS ---
