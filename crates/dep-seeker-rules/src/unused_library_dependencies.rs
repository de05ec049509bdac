//! Rule to detect external libraries whose classes are never imported.
//!
//! # Detection
//!
//! The imports considered are the module's own plus those of the sibling
//! modules it depends on, so a library consumed through a dependent layer
//! still counts as used. A library is used when
//!
//! - one of its classes is imported by name, or
//! - one of its classes shares a package with an import. This covers
//!   top-level Kotlin functions and extensions, which are imported directly
//!   rather than through their enclosing class.
//!
//! # Suppression
//!
//! List the resolved `group:artifact:version` in `ignored_dependencies`.

use dep_seeker_core::{
    AnalysisError, DependencyGraph, DependencyRule, ModuleDescriptor, Violation, ViolationKind,
};
use std::collections::{BTreeSet, HashSet};

/// Rule code for unused-library-dependency.
pub const CODE: &str = "DS002";

/// Rule name for unused-library-dependency.
pub const NAME: &str = "unused-library-dependency";

/// Reports declared external libraries that no import uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedLibraryDependencies;

impl UnusedLibraryDependencies {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Whether `imports` reference any class in `symbols`.
#[must_use]
pub fn uses_library(imports: &[String], symbols: &BTreeSet<String>) -> bool {
    if imports.iter().any(|import| symbols.contains(import)) {
        return true;
    }
    let import_packages: HashSet<&str> = imports.iter().map(|i| package_prefix(i)).collect();
    symbols
        .iter()
        .any(|symbol| import_packages.contains(package_prefix(symbol)))
}

/// Text up to and including the last dot; the whole name when there is none.
fn package_prefix(name: &str) -> &str {
    name.rfind('.').map_or(name, |dot| &name[..=dot])
}

impl DependencyRule for UnusedLibraryDependencies {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Detects external libraries whose classes are never imported"
    }

    fn check(
        &self,
        graph: &mut DependencyGraph<'_>,
        module: &ModuleDescriptor,
    ) -> Result<Vec<Violation>, AnalysisError> {
        let libraries = graph.resolve_library_contents(module)?;
        if libraries.is_empty() {
            return Ok(Vec::new());
        }

        let mut imports = graph.source_imports(module)?.to_vec();
        for dependency in graph.dependent_modules(module)? {
            imports.extend(graph.source_imports(dependency)?.iter().cloned());
        }

        Ok(libraries
            .iter()
            .filter(|library| !uses_library(&imports, &library.symbols))
            .map(|library| {
                Violation::new(
                    CODE,
                    NAME,
                    module.display_name(),
                    library.full_name.clone(),
                    ViolationKind::UnusedLibrary,
                )
            })
            .collect())
    }
}
