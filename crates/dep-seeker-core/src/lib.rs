//! # dep-seeker-core
//!
//! Core engine for dependency-usage linting of multi-module JVM projects.
//!
//! This crate decides whether the dependencies a module declares are
//! actually used by its sources. It includes:
//!
//! - [`extractor`] for pulling imports and packages out of Kotlin/Java text
//! - [`archive`] for listing the classes packaged in `.jar`/`.aar` artifacts
//! - [`BuildGraphProvider`] and [`ManifestGraph`] for reading the project graph
//! - [`DependencyGraph`], the memoizing service rules query
//! - [`DependencyRule`] and [`Analyzer`] for running checks per module
//! - [`AggregateReport`] for the final pass/fail report
//!
//! ## Example
//!
//! ```ignore
//! use dep_seeker_core::{AggregateReport, Analyzer, ManifestGraph};
//!
//! let graph = ManifestGraph::load("build/dep-seeker/graph.json".as_ref())?;
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = analyzer.analyze(&graph)?;
//! AggregateReport::new(&result, "build/dep-seeker-report.txt").publish(true)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod custom;
mod error;
mod graph;
mod metadata;
mod model;
mod provider;
mod report;
mod rule;
mod types;

/// Packaged artifact indexing.
pub mod archive;
/// Import and package extraction.
pub mod extractor;

pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use config::{
    AnalyzerConfig, Config, ConfigError, CustomCheckConfig, ModuleConfig, ModuleSettings,
    RuleConfig, DEFAULT_REPORT_PATH,
};
pub use custom::CustomCheck;
pub use error::{AnalysisError, ArchiveError, ManifestError};
pub use graph::{
    imports_any_package, is_accepted_configuration, is_production_configuration, DependencyGraph,
};
pub use metadata::{
    ExternalDependency, InternalDependency, LibraryContent, ModuleMetadata, SourceFile,
    SourceFileMetadata,
};
pub use model::{
    Configuration, Coordinate, CoordinateParseError, DeclaredDependency, ModuleDescriptor,
    ModuleId, ResolvedDependency,
};
pub use provider::{BuildGraphProvider, ManifestGraph};
pub use report::{AggregateReport, LintFailure, ReportError};
pub use rule::{DependencyRule, RuleBox};
pub use types::{LintResult, Violation, ViolationKind};
