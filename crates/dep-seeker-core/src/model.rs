//! Build graph data model.
//!
//! These types describe what the host build system knows about a project:
//! its modules, their dependency-bearing configurations, the declared
//! dependencies and the resolved artifacts behind them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Stable identifier of a module, its declaration path (e.g. `:feature-api1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Creates a module identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A `group:artifact:version` triple identifying an external library.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    /// Group (e.g. `com.squareup.okio`).
    pub group: String,
    /// Artifact name (e.g. `okio`).
    pub artifact: String,
    /// Version (e.g. `3.6.0`).
    pub version: String,
}

impl Coordinate {
    /// Creates a coordinate from its parts.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Returns the versionless `group:artifact` key.
    #[must_use]
    pub fn module_key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// Whether both coordinates name the same `group:artifact`.
    #[must_use]
    pub fn same_module(&self, other: &Self) -> bool {
        self.group == other.group && self.artifact == other.artifact
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Error returned when text is not a `group:artifact:version` triple.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate `{0}`, expected group:artifact:version")]
pub struct CoordinateParseError(pub String);

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(CoordinateParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Coordinate {
    type Error = CoordinateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

/// A dependency as written in a module's build script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredDependency {
    /// Reference to a sibling module of the same project.
    Module(ModuleId),
    /// Reference to a published library.
    External(Coordinate),
}

/// A first-level dependency as resolved by the build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedDependency {
    /// Coordinate actually selected by resolution.
    pub coordinate: Coordinate,
    /// Full `group:name:version` names of the modules that requested it.
    #[serde(default)]
    pub requested_by: Vec<String>,
    /// Files backing this dependency.
    #[serde(default)]
    pub artifacts: Vec<PathBuf>,
}

impl ResolvedDependency {
    /// Whether `requester` asked for this dependency itself.
    #[must_use]
    pub fn is_requested_by(&self, requester: &str) -> bool {
        self.requested_by.iter().any(|r| r == requester)
    }
}

/// A dependency-bearing configuration of a module (e.g. `implementation`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Configuration name.
    pub name: String,
    /// Whether the build can resolve this configuration.
    #[serde(default)]
    pub can_be_resolved: bool,
    /// Dependencies declared in this configuration.
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
    /// First-level dependencies after resolution.
    #[serde(default)]
    pub resolved: Vec<ResolvedDependency>,
}

impl Configuration {
    /// Iterates over the declared external coordinates.
    pub fn external_dependencies(&self) -> impl Iterator<Item = &Coordinate> {
        self.dependencies.iter().filter_map(|d| match d {
            DeclaredDependency::External(c) => Some(c),
            DeclaredDependency::Module(_) => None,
        })
    }

    /// Iterates over the declared sibling-module references.
    pub fn module_dependencies(&self) -> impl Iterator<Item = &ModuleId> {
        self.dependencies.iter().filter_map(|d| match d {
            DeclaredDependency::Module(id) => Some(id),
            DeclaredDependency::External(_) => None,
        })
    }
}

/// One module of the analyzed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Declaration path.
    pub id: ModuleId,
    /// Human-facing name used in violation text; defaults to the id.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Maven group of the module.
    #[serde(default)]
    pub group: String,
    /// Module name.
    #[serde(default)]
    pub name: String,
    /// Module version.
    #[serde(default)]
    pub version: String,
    /// Module directory.
    pub project_dir: PathBuf,
    /// Source roots relative to `project_dir`.
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<PathBuf>,
    /// Dependency-bearing configurations.
    #[serde(default)]
    pub configurations: Vec<Configuration>,
}

fn default_source_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}

impl ModuleDescriptor {
    /// Creates a module with no configurations and the default `src` root.
    #[must_use]
    pub fn new(id: impl Into<ModuleId>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            group: String::new(),
            name: String::new(),
            version: String::new(),
            project_dir: project_dir.into(),
            source_roots: default_source_roots(),
            configurations: Vec::new(),
        }
    }

    /// Sets the `group:name:version` triple.
    #[must_use]
    pub fn with_gav(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.group = group.into();
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Adds a configuration.
    #[must_use]
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configurations.push(configuration);
        self
    }

    /// Name used in violation text.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }

    /// Full `group:name:version` name, as recorded in `requested_by`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}:{}:{}", self.group, self.name, self.version)
    }

    /// Absolute source roots of this module.
    #[must_use]
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        self.source_roots
            .iter()
            .map(|root| self.project_dir.join(root))
            .collect()
    }
}

impl From<String> for ModuleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
