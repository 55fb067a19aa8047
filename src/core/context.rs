// src/core/context.rs

use crate::core::properties::PropertyStore;
use std::path::{Path, PathBuf};

/// Build-scope state shared by every resolution: the external property store
/// and the directories the build runs in.
///
/// Owned by the build-scope collaborator and passed explicitly into the
/// composer; there is no ambient global configuration.
#[derive(Debug, Clone)]
pub struct BuildContext {
    properties: PropertyStore,
    build_dir: PathBuf,
    working_dir: PathBuf,
}

impl BuildContext {
    pub fn new(
        properties: PropertyStore,
        build_dir: impl Into<PathBuf>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            properties,
            build_dir: build_dir.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// The build output root; computed defaults (like the chart output
    /// directory) hang off this path.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Default working directory for invocations without an override.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
