// src/core/composer.rs

use crate::constants::{DEFAULT_TIMEOUT_SECONDS, ENV_HELM_HOST, ENV_KUBECONFIG};
use crate::core::context::BuildContext;
use crate::core::options::{HelmOptions, ResolvedOptions};
use crate::core::provider::ResolveError;
use crate::models::{ExecSpec, Invocation, OptionValue};
use std::collections::BTreeMap;
use std::path::Path;

/// Merges the global option set with one exec specification into a concrete
/// invocation.
///
/// Forces resolution of every slot (the only place a [`ResolveError`] can
/// surface), then builds the argument vector, the final environment map and
/// the working directory. Pure apart from those resolution reads: nothing is
/// executed and neither input is mutated, so composing the same inputs twice
/// yields identical invocations.
pub fn compose(
    options: &HelmOptions,
    spec: &ExecSpec,
    ctx: &BuildContext,
) -> Result<Invocation, ResolveError> {
    let resolved = options.resolve(ctx)?;
    Ok(compose_resolved(&resolved, spec, ctx))
}

/// Composition against an already-resolved option snapshot.
pub fn compose_resolved(
    resolved: &ResolvedOptions,
    spec: &ExecSpec,
    ctx: &BuildContext,
) -> Invocation {
    let mut argv: Vec<String> = Vec::with_capacity(8 + spec.args.len() + spec.options.len() * 2);

    argv.push(resolved.executable.clone());
    if resolved.debug {
        argv.push("--debug".to_string());
    }
    if let Some(home) = &resolved.home {
        argv.push("--home".to_string());
        argv.push(path_to_arg(home));
    }
    if let Some(kube_context) = &resolved.kube_context {
        argv.push("--kube-context".to_string());
        argv.push(kube_context.clone());
    }
    if let Some(timeout) = resolved.timeout_seconds {
        // Helm's own default is not repeated on the command line unless the
        // caller assigned it explicitly.
        if resolved.timeout_is_explicit || timeout != DEFAULT_TIMEOUT_SECONDS {
            argv.push("--timeout".to_string());
            argv.push(timeout.to_string());
        }
    }

    argv.push(spec.command.clone());
    if let Some(subcommand) = &spec.subcommand {
        argv.push(subcommand.clone());
    }

    for (name, value) in &spec.options {
        match value {
            OptionValue::Value(v) => {
                argv.push(flag_name(name));
                argv.push(v.clone());
            }
            OptionValue::Switch(true) => argv.push(flag_name(name)),
            OptionValue::Switch(false) => {}
        }
    }

    argv.extend(spec.args.iter().cloned());
    argv.extend(resolved.extra_args.iter().cloned());
    if !spec.extra_args.is_empty() && spec.extra_args != resolved.extra_args {
        argv.extend(spec.extra_args.iter().cloned());
    }

    let mut env: BTreeMap<String, String> = std::env::vars().collect();
    if let Some(host) = &resolved.host {
        env.insert(ENV_HELM_HOST.to_string(), host.clone());
    }
    if let Some(kube_config) = &resolved.kube_config {
        env.insert(ENV_KUBECONFIG.to_string(), path_to_arg(kube_config));
    }
    // The specification's entries go in last: they win over anything derived
    // from the global options.
    for (name, value) in &spec.env {
        env.insert(name.clone(), value.clone());
    }

    let cwd = spec
        .working_dir
        .as_deref()
        .unwrap_or_else(|| ctx.working_dir());
    let cwd = dunce::simplified(cwd).to_path_buf();

    log::debug!("Composed invocation: {argv:?} (cwd: {})", cwd.display());

    Invocation {
        argv,
        env,
        cwd,
        ignore_exit_value: spec.ignore_exit_value,
    }
}

fn path_to_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Option names are passed through verbatim when already dashed, otherwise
/// they are rendered as long flags.
fn flag_name(name: &str) -> String {
    if name.starts_with('-') {
        name.to_string()
    } else {
        format!("--{name}")
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::PropertyStore;
    use std::path::PathBuf;

    fn context(pairs: &[(&str, &str)]) -> BuildContext {
        let mut store = PropertyStore::new();
        for (key, value) in pairs {
            store.set(*key, *value);
        }
        BuildContext::new(store, "/proj/build", "/proj")
    }

    #[test]
    fn test_minimal_spec_with_default_options() {
        let invocation = compose(
            &HelmOptions::new(),
            &ExecSpec::new("version"),
            &context(&[]),
        )
        .unwrap();
        assert_eq!(invocation.argv, vec!["helm", "version"]);
        assert_eq!(invocation.cwd, PathBuf::from("/proj"));
        assert!(!invocation.ignore_exit_value);
    }

    #[test]
    fn test_global_flags_come_before_the_command() {
        let ctx = context(&[
            ("helm.debug", "true"),
            ("helm.home", "/var/helm"),
            ("helm.kubeContext", "staging"),
            ("helm.timeoutSeconds", "600"),
        ]);
        let invocation = compose(&HelmOptions::new(), &ExecSpec::new("lint"), &ctx).unwrap();
        assert_eq!(
            invocation.argv,
            vec![
                "helm",
                "--debug",
                "--home",
                "/var/helm",
                "--kube-context",
                "staging",
                "--timeout",
                "600",
                "lint",
            ]
        );
    }

    #[test]
    fn test_timeout_at_tool_default_is_omitted() {
        let ctx = context(&[("helm.timeoutSeconds", "300")]);
        let invocation = compose(&HelmOptions::new(), &ExecSpec::new("lint"), &ctx).unwrap();
        assert_eq!(invocation.argv, vec!["helm", "lint"]);
    }

    #[test]
    fn test_explicit_timeout_is_always_emitted() {
        let mut options = HelmOptions::new();
        options.timeout_seconds.set(300);
        let invocation = compose(&options, &ExecSpec::new("lint"), &context(&[])).unwrap();
        assert_eq!(invocation.argv, vec!["helm", "lint", "--timeout", "300"]);
    }

    #[test]
    fn test_subcommand_options_and_args_keep_their_order() {
        let mut spec = ExecSpec::new("repo");
        spec.subcommand("add")
            .option("--username", "u")
            .flag("--no-update", true)
            .flag("--verify", false)
            .option("--password", "p")
            .arg("stable")
            .arg("https://charts.example.com");
        let invocation = compose(&HelmOptions::new(), &spec, &context(&[])).unwrap();
        assert_eq!(
            invocation.argv,
            vec![
                "helm",
                "repo",
                "add",
                "--username",
                "u",
                "--no-update",
                "--password",
                "p",
                "stable",
                "https://charts.example.com",
            ]
        );
    }

    #[test]
    fn test_undashed_option_names_become_long_flags() {
        let mut spec = ExecSpec::new("package");
        spec.option("destination", "/out");
        let invocation = compose(&HelmOptions::new(), &spec, &context(&[])).unwrap();
        assert_eq!(
            invocation.argv,
            vec!["helm", "package", "--destination", "/out"]
        );
    }

    #[test]
    fn test_global_extra_args_come_after_positional_args() {
        let ctx = context(&[("helm.extraArgs", "--tls")]);
        let mut spec = ExecSpec::new("lint");
        spec.arg("./chart");
        let invocation = compose(&HelmOptions::new(), &spec, &ctx).unwrap();
        assert_eq!(invocation.argv, vec!["helm", "lint", "./chart", "--tls"]);
    }

    #[test]
    fn test_spec_extra_args_appended_when_distinct() {
        let ctx = context(&[("helm.extraArgs", "--tls")]);
        let mut spec = ExecSpec::new("lint");
        spec.extra_arg("--strict");
        let invocation = compose(&HelmOptions::new(), &spec, &ctx).unwrap();
        assert_eq!(invocation.argv, vec!["helm", "lint", "--tls", "--strict"]);
    }

    #[test]
    fn test_spec_extra_args_equal_to_global_are_not_duplicated() {
        let ctx = context(&[("helm.extraArgs", "--tls")]);
        let mut spec = ExecSpec::new("lint");
        spec.extra_arg("--tls");
        let invocation = compose(&HelmOptions::new(), &spec, &ctx).unwrap();
        assert_eq!(invocation.argv, vec!["helm", "lint", "--tls"]);
    }

    #[test]
    fn test_host_and_kube_config_are_exported() {
        let ctx = context(&[
            ("helm.host", "localhost:44134"),
            ("helm.kubeConfig", "/etc/kube/config"),
        ]);
        let invocation = compose(&HelmOptions::new(), &ExecSpec::new("list"), &ctx).unwrap();
        assert_eq!(
            invocation.env.get("HELM_HOST").map(String::as_str),
            Some("localhost:44134")
        );
        assert_eq!(
            invocation.env.get("KUBECONFIG").map(String::as_str),
            Some("/etc/kube/config")
        );
    }

    #[test]
    fn test_spec_environment_wins_over_derived_entries() {
        let ctx = context(&[("helm.host", "localhost:44134")]);
        let mut spec = ExecSpec::new("list");
        spec.env("HELM_HOST", "override:1234");
        let invocation = compose(&HelmOptions::new(), &spec, &ctx).unwrap();
        assert_eq!(
            invocation.env.get("HELM_HOST").map(String::as_str),
            Some("override:1234")
        );
    }

    #[test]
    fn test_inherited_environment_is_carried_over() {
        // PATH is present in any realistic test environment.
        let invocation = compose(
            &HelmOptions::new(),
            &ExecSpec::new("version"),
            &context(&[]),
        )
        .unwrap();
        assert_eq!(
            invocation.env.get("PATH").cloned(),
            std::env::var("PATH").ok()
        );
    }

    #[test]
    fn test_working_dir_override() {
        let mut spec = ExecSpec::new("lint");
        spec.working_dir("/charts/app");
        let invocation = compose(&HelmOptions::new(), &spec, &context(&[])).unwrap();
        assert_eq!(invocation.cwd, PathBuf::from("/charts/app"));
    }

    #[test]
    fn test_ignore_exit_value_is_carried_through() {
        let mut spec = ExecSpec::new("lint");
        spec.ignore_exit_value(true);
        let invocation = compose(&HelmOptions::new(), &spec, &context(&[])).unwrap();
        assert!(invocation.ignore_exit_value);
    }

    #[test]
    fn test_composition_round_trips_identically() {
        let ctx = context(&[
            ("helm.debug", "true"),
            ("helm.host", "localhost:44134"),
            ("helm.extraArgs", "--tls"),
        ]);
        let options = HelmOptions::new();
        let mut spec = ExecSpec::new("package");
        spec.option("--destination", "/out").arg("./chart");
        let first = compose(&options, &spec, &ctx).unwrap();
        let second = compose(&options, &spec, &ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_timeout_fails_composition() {
        let ctx = context(&[("helm.timeoutSeconds", "soon")]);
        let err = compose(&HelmOptions::new(), &ExecSpec::new("lint"), &ctx).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidInt { .. }));
    }
}
