//! Access to the host build's project graph.

use crate::error::ManifestError;
use crate::model::{ModuleDescriptor, ModuleId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the configured modules of a project.
///
/// Implementations must return modules in a stable order; analysis and
/// reporting follow it.
pub trait BuildGraphProvider {
    /// All modules of the project, in project order.
    fn modules(&self) -> &[ModuleDescriptor];

    /// Looks a module up by identifier.
    fn module(&self, id: &ModuleId) -> Option<&ModuleDescriptor> {
        self.modules().iter().find(|m| &m.id == id)
    }
}

/// A project graph exported by the host build as JSON.
///
/// ```json
/// {
///   "modules": [
///     {
///       "id": ":app",
///       "group": "com.example", "name": "app", "version": "1.0",
///       "project_dir": "app",
///       "configurations": [
///         {
///           "name": "releaseRuntimeClasspath",
///           "can_be_resolved": true,
///           "dependencies": [{"module": ":core"}, {"external": "com.squareup.okio:okio:3.6.0"}],
///           "resolved": [
///             {
///               "coordinate": "com.squareup.okio:okio:3.6.0",
///               "requested_by": ["com.example:app:1.0"],
///               "artifacts": ["libs/okio-3.6.0.jar"]
///             }
///           ]
///         }
///       ]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestGraph {
    modules: Vec<ModuleDescriptor>,
}

impl ManifestGraph {
    /// Creates a graph from already-built descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error if two modules share an identifier.
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self, ManifestError> {
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(&module.id) {
                return Err(ManifestError::DuplicateModule(module.id.clone()));
            }
        }
        Ok(Self { modules })
    }

    /// Loads a manifest file. Relative paths inside it are resolved against
    /// the manifest's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let graph = Self::parse(&content, base)?;
        debug!(
            manifest = %path.display(),
            modules = graph.modules.len(),
            "loaded build graph"
        );
        Ok(graph)
    }

    /// Parses manifest text, resolving relative paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a coordinate is invalid,
    /// or a module identifier repeats.
    pub fn parse(content: &str, base: &Path) -> Result<Self, ManifestError> {
        let raw: Self = serde_json::from_str(content)?;
        let modules = raw
            .modules
            .into_iter()
            .map(|module| rebase(module, base))
            .collect();
        Self::new(modules)
    }
}

impl BuildGraphProvider for ManifestGraph {
    fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }
}

fn rebase(mut module: ModuleDescriptor, base: &Path) -> ModuleDescriptor {
    module.project_dir = absolutize(base, &module.project_dir);
    for configuration in &mut module.configurations {
        for resolved in &mut configuration.resolved {
            for artifact in &mut resolved.artifacts {
                *artifact = absolutize(base, artifact);
            }
        }
    }
    module
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
