//! Configuration file lookup.
//!
//! The first match wins:
//!
//! 1. `--config` flag
//! 2. `{project}/dep-seeker.toml`, then `{project}/.dep-seeker.toml`
//! 3. `$DEP_SEEKER_CONFIG_DIR/config.toml`, else `~/.dep-seeker/config.toml`
//! 4. built-in defaults

use anyhow::{Context, Result};
use dep_seeker_core::Config;
use std::path::{Path, PathBuf};

/// Environment variable overriding the global config directory.
pub const CONFIG_DIR_ENV: &str = "DEP_SEEKER_CONFIG_DIR";

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: [&str; 2] = ["dep-seeker.toml", ".dep-seeker.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the project.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The file to read, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Finds the configuration file for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    locate(project_dir, explicit, global_config_dir().as_deref())
}

/// Finds and parses the configuration for `project_dir`.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<(Config, ConfigSource)> {
    let source = resolve(project_dir, explicit);
    let config = match source.path() {
        None => Config::default(),
        Some(path) => {
            if matches!(source, ConfigSource::Global(_)) {
                tracing::info!("Using global config: {}", path.display());
            }
            Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
    };
    Ok((config, source))
}

fn locate(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(found) = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
    {
        tracing::debug!("Found global config: {}", found.display());
        return ConfigSource::Global(found);
    }

    ConfigSource::Default
}

/// The global config directory: `$DEP_SEEKER_CONFIG_DIR`, else `~/.dep-seeker`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|home| home.join(".dep-seeker")),
    }
}
