//! Configuration types for dep-seeker.

use crate::model::ModuleId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default location of the aggregate report, relative to the project root.
pub const DEFAULT_REPORT_PATH: &str = "build/dep-seeker-report.txt";

/// Top-level configuration for dep-seeker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether modules are analyzed at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether a non-empty report stops the build.
    #[serde(default = "default_true")]
    pub fail_on_violations: bool,

    /// Coordinates (`group:artifact:version`) or module ids never reported.
    #[serde(default)]
    pub ignored_dependencies: Vec<String>,

    /// Where the aggregate report is written.
    #[serde(default = "default_report")]
    pub report: PathBuf,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule switches, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,

    /// Per-module overrides, keyed by module id.
    #[serde(default)]
    pub modules: HashMap<String, ModuleConfig>,

    /// Declarative custom checks, in evaluation order.
    #[serde(default)]
    pub custom_checks: Vec<CustomCheckConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            fail_on_violations: true,
            ignored_dependencies: Vec::new(),
            report: default_report(),
            analyzer: AnalyzerConfig::default(),
            rules: HashMap::new(),
            modules: HashMap::new(),
            custom_checks: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a glob pattern is malformed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.exclude_patterns()?;
        for check in &config.custom_checks {
            check.library_pattern()?;
        }
        Ok(config)
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Effective settings for one module, project values overridden field by field.
    #[must_use]
    pub fn module_settings(&self, id: &ModuleId) -> ModuleSettings<'_> {
        let overrides = self.modules.get(id.as_str());
        ModuleSettings {
            enabled: overrides
                .and_then(|o| o.enabled)
                .unwrap_or(self.enabled),
            ignored_dependencies: overrides
                .and_then(|o| o.ignored_dependencies.as_deref())
                .unwrap_or(&self.ignored_dependencies),
        }
    }

    /// Compiled `analyzer.exclude` patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob.
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>, ConfigError> {
        self.analyzer
            .exclude
            .iter()
            .map(|p| compile_pattern(p))
            .collect()
    }
}

/// Settings in effect for a single module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSettings<'a> {
    /// Whether the module is analyzed.
    pub enabled: bool,
    /// Dependencies exempt from the unused-dependency rules.
    pub ignored_dependencies: &'a [String],
}

impl ModuleSettings<'_> {
    /// Whether `name` appears in the ignore list.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_dependencies.iter().any(|i| i == name)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns of source files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Per-module overrides. Unset fields inherit the project value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Overrides [`Config::enabled`].
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Replaces [`Config::ignored_dependencies`].
    #[serde(default)]
    pub ignored_dependencies: Option<Vec<String>>,
}

/// A custom check declared in the configuration file.
///
/// ```toml
/// [[custom_checks]]
/// name = "no-support-lib"
/// library = "com.android.support:*"
/// message = "{module} still depends on {library}"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomCheckConfig {
    /// Check name.
    pub name: String,
    /// Glob over the library's `group:artifact:version`.
    pub library: String,
    /// Message template; `{module}` and `{library}` are substituted.
    pub message: String,
}

impl CustomCheckConfig {
    /// Compiles the `library` glob.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn library_pattern(&self) -> Result<glob::Pattern, ConfigError> {
        compile_pattern(&self.library)
    }
}

fn compile_pattern(pattern: &str) -> Result<glob::Pattern, ConfigError> {
    glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn default_report() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A glob pattern could not be compiled.
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },
}
