//! # dep-seeker-rules
//!
//! Built-in dependency-usage rules for dep-seeker.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DS001 | `unused-module-dependency` | Module dependencies whose packages are never imported |
//! | DS002 | `unused-library-dependency` | External libraries whose classes are never imported |
//! | DS100 | `custom-check` | User-supplied checks over each external library |
//!
//! ## Usage
//!
//! ```ignore
//! use dep_seeker_core::{Analyzer, Config, ManifestGraph};
//! use dep_seeker_rules::default_rules;
//!
//! let config = Config::from_file("dep-seeker.toml".as_ref())?;
//! let analyzer = Analyzer::builder()
//!     .rules(default_rules(&config, Vec::new())?)
//!     .config(config)
//!     .build();
//! let result = analyzer.analyze(&ManifestGraph::load("graph.json".as_ref())?)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod custom_dependency_check;
mod presets;
mod unused_library_dependencies;
mod unused_module_dependencies;

pub use custom_dependency_check::CustomDependencyCheck;
pub use presets::{all_rules, default_rules};
pub use unused_library_dependencies::{uses_library, UnusedLibraryDependencies};
pub use unused_module_dependencies::UnusedModuleDependencies;

/// Re-export core types for convenience.
pub use dep_seeker_core::{CustomCheck, DependencyRule, Violation};
