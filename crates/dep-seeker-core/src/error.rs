//! Error types for dependency analysis.

use crate::config::ConfigError;
use crate::model::{Coordinate, ModuleId};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an analysis run.
///
/// Lint findings are not errors; they are returned as data in
/// [`LintResult`](crate::LintResult).
#[derive(Debug, Error, Diagnostic)]
pub enum AnalysisError {
    /// A per-module query ran before [`DependencyGraph::initialize`](crate::DependencyGraph::initialize).
    #[error("dependency graph queried before initialization")]
    #[diagnostic(
        code(dep_seeker::uninitialized),
        help("call `DependencyGraph::initialize` once before analyzing modules")
    )]
    Uninitialized,

    /// A declared coordinate did not map to exactly one resolved dependency.
    #[error(
        "cannot resolve {dependency} declared by {module}: candidates [{}]",
        .candidates.join(", ")
    )]
    #[diagnostic(
        code(dep_seeker::ambiguous_resolution),
        help("declare the exact version selected by the build, or add the library to `ignored_dependencies`")
    )]
    AmbiguousResolution {
        /// Module declaring the dependency.
        module: ModuleId,
        /// The declared coordinate.
        dependency: Coordinate,
        /// Resolved coordinates sharing `group:artifact`.
        candidates: Vec<String>,
    },

    /// An artifact backing a dependency could not be read.
    #[error("failed to index artifact {path}")]
    #[diagnostic(code(dep_seeker::archive))]
    Archive {
        /// Artifact path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: ArchiveError,
    },

    /// A source root or source file could not be read.
    #[error("failed to read sources at {path}")]
    #[diagnostic(code(dep_seeker::source_read))]
    SourceRead {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be applied.
    #[error(transparent)]
    #[diagnostic(code(dep_seeker::config))]
    Config(#[from] ConfigError),
}

/// Errors raised while reading a packaged archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The file could not be opened or an entry could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a valid zip archive.
    #[error("corrupt archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Errors raised while loading a build graph manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be read.
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or does not match the expected shape.
    #[error("Failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// Two modules share an identifier.
    #[error("Duplicate module id `{0}` in manifest")]
    DuplicateModule(ModuleId),
}
