// src/constants.rs

/// The name of the project-level property file, looked up in the working directory.
pub const PROJECT_PROPERTIES_FILENAME: &str = "helmrun.toml";

/// The directory under the user configuration root that holds the user-level property file.
pub const USER_CONFIG_DIR: &str = "helmrun";

/// Property key for the helm executable path.
pub const PROP_EXECUTABLE: &str = "helm.executable";

/// Property key enabling helm's verbose output.
pub const PROP_DEBUG: &str = "helm.debug";

/// Property key for the helm home directory (`--home`).
pub const PROP_HOME: &str = "helm.home";

/// Property key for the Tiller address, in `host:port` form.
pub const PROP_HOST: &str = "helm.host";

/// Property key for the kubeconfig context name (`--kube-context`).
pub const PROP_KUBE_CONTEXT: &str = "helm.kubeContext";

/// Property key for the path to the Kubernetes configuration file.
pub const PROP_KUBE_CONFIG: &str = "helm.kubeConfig";

/// Property key for the Kubernetes operation timeout, in seconds.
pub const PROP_TIMEOUT_SECONDS: &str = "helm.timeoutSeconds";

/// Property key for additional arguments appended to every invocation.
pub const PROP_EXTRA_ARGS: &str = "helm.extraArgs";

/// Property key for the base output directory for packaged charts.
pub const PROP_OUTPUT_DIR: &str = "helm.outputDir";

/// The executable used when nothing else is configured.
pub const DEFAULT_EXECUTABLE: &str = "helm";

/// Helm's own built-in default for `--timeout`, in seconds. The flag is only
/// emitted when the resolved value differs or was assigned explicitly.
pub const DEFAULT_TIMEOUT_SECONDS: u32 = 300;

/// Chart output directory, relative to the build directory.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "helm/charts";

/// Environment variable carrying the Tiller host address.
pub const ENV_HELM_HOST: &str = "HELM_HOST";

/// Environment variable pointing helm at a kubeconfig file.
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";

/// Maximum placeholder expansion depth before resolution is aborted.
pub const MAX_EXPANSION_DEPTH: u32 = 32;
