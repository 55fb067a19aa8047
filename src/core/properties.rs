// src/core/properties.rs

use crate::constants::{PROJECT_PROPERTIES_FILENAME, USER_CONFIG_DIR};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error parsing TOML in '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Property '{key}' has an unsupported value: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// The external property source: a flat map of dotted names
/// (`helm.executable`) to raw string values.
///
/// Built by merging, lowest precedence first: the user-level property file,
/// the project-level property file, and explicit `-P key=value` definitions.
/// Read-only once resolution starts.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: HashMap<String, String>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a property by its dotted name. A missing key is `None`,
    /// never an error.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Inserts or replaces a single property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merges a TOML document into the store. Nested tables flatten into
    /// dotted keys, so `[helm] executable = "h3"` becomes `helm.executable`.
    /// Later merges win over earlier ones.
    pub fn merge_toml_str(&mut self, content: &str, origin: &str) -> Result<(), PropertyError> {
        let root: toml::Value =
            toml::from_str(content).map_err(|source| PropertyError::TomlParse {
                path: origin.to_string(),
                source,
            })?;
        flatten_value("", &root, &mut self.values)?;
        Ok(())
    }

    pub fn merge_toml_file(&mut self, path: &Path) -> Result<(), PropertyError> {
        let content = fs::read_to_string(path)?;
        self.merge_toml_str(&content, &path.display().to_string())
    }

    /// Builds a store from the given property files and explicit definitions.
    /// Files that do not exist are skipped silently; definitions always win.
    pub fn load(
        user_file: Option<&Path>,
        project_file: Option<&Path>,
        defines: &[(String, String)],
    ) -> Result<Self, PropertyError> {
        let mut store = Self::new();
        for file in [user_file, project_file].into_iter().flatten() {
            if file.is_file() {
                log::debug!("Merging properties from '{}'.", file.display());
                store.merge_toml_file(file)?;
            } else {
                log::debug!("Property file '{}' not found, skipping.", file.display());
            }
        }
        for (key, value) in defines {
            store.set(key.clone(), value.clone());
        }
        Ok(store)
    }
}

/// Location of the user-level property file
/// (`<config-dir>/helmrun/helmrun.toml`), if a config directory exists.
pub fn user_properties_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(PROJECT_PROPERTIES_FILENAME))
}

fn flatten_value(
    prefix: &str,
    value: &toml::Value,
    out: &mut HashMap<String, String>,
) -> Result<(), PropertyError> {
    match value {
        toml::Value::Table(table) => {
            for (name, child) in table {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten_value(&key, child, out)?;
            }
        }
        toml::Value::Array(items) => {
            // Arrays stringify into a shell-splittable form so list-typed
            // slots round-trip elements containing spaces.
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                let part = match item {
                    toml::Value::String(s) => shlex::try_quote(s)
                        .map_err(|_| PropertyError::InvalidValue {
                            key: prefix.to_string(),
                            reason: "array element contains a NUL byte".to_string(),
                        })?
                        .into_owned(),
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    _ => {
                        return Err(PropertyError::InvalidValue {
                            key: prefix.to_string(),
                            reason: "nested arrays and tables are not supported".to_string(),
                        });
                    }
                };
                parts.push(part);
            }
            out.insert(prefix.to_string(), parts.join(" "));
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        toml::Value::Integer(i) => {
            out.insert(prefix.to_string(), i.to_string());
        }
        toml::Value::Float(f) => {
            out.insert(prefix.to_string(), f.to_string());
        }
        toml::Value::Boolean(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        toml::Value::Datetime(dt) => {
            out.insert(prefix.to_string(), dt.to_string());
        }
    }
    Ok(())
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_nested_tables_flatten_to_dotted_keys() {
        let mut store = PropertyStore::new();
        store
            .merge_toml_str(
                r#"
                [helm]
                executable = "helm3"
                debug = true
                timeoutSeconds = 120
                "#,
                "test",
            )
            .unwrap();
        assert_eq!(store.get("helm.executable"), Some("helm3"));
        assert_eq!(store.get("helm.debug"), Some("true"));
        assert_eq!(store.get("helm.timeoutSeconds"), Some("120"));
    }

    #[test]
    fn test_arrays_join_shell_splittable() {
        let mut store = PropertyStore::new();
        store
            .merge_toml_str(
                r#"
                [helm]
                extraArgs = ["--tls", "--tiller-namespace", "kube system"]
                "#,
                "test",
            )
            .unwrap();
        let raw = store.get("helm.extraArgs").unwrap();
        let split = shlex::split(raw).unwrap();
        assert_eq!(split, vec!["--tls", "--tiller-namespace", "kube system"]);
    }

    #[test]
    fn test_later_merge_wins() {
        let mut store = PropertyStore::new();
        store
            .merge_toml_str("[helm]\nexecutable = \"first\"", "a")
            .unwrap();
        store
            .merge_toml_str("[helm]\nexecutable = \"second\"", "b")
            .unwrap();
        assert_eq!(store.get("helm.executable"), Some("second"));
    }

    #[test]
    fn test_invalid_toml_names_the_origin() {
        let mut store = PropertyStore::new();
        let err = store
            .merge_toml_str("not == toml", "broken.toml")
            .unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_load_precedence_defines_win_over_project() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("helmrun.toml");
        let mut file = std::fs::File::create(&project).unwrap();
        writeln!(file, "[helm]\nexecutable = \"from-file\"\nhost = \"h:1\"").unwrap();

        let defines = vec![("helm.executable".to_string(), "from-define".to_string())];
        let store = PropertyStore::load(None, Some(&project), &defines).unwrap();

        assert_eq!(store.get("helm.executable"), Some("from-define"));
        assert_eq!(store.get("helm.host"), Some("h:1"));
    }

    #[test]
    fn test_load_skips_missing_files() {
        let store =
            PropertyStore::load(Some(Path::new("/nonexistent/user.toml")), None, &[]).unwrap();
        assert!(store.is_empty());
    }
}
