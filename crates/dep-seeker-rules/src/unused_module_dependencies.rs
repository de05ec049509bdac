//! Rule to detect sibling-module dependencies whose code is never imported.
//!
//! # Rationale
//!
//! A module that declares `implementation(project(":x"))` but imports nothing
//! from `:x` drags `:x` into its build for no reason. Often the imports do
//! come from a module `:x` itself depends on; in that case the violation
//! names that module as the dependency to declare instead.
//!
//! # Detection
//!
//! A dependency is used when any import of the module starts with a package
//! declared by the dependency's sources.
//!
//! # Suppression
//!
//! List the module id in `ignored_dependencies`.

use dep_seeker_core::{
    imports_any_package, AnalysisError, DependencyGraph, DependencyRule, ModuleDescriptor,
    Violation, ViolationKind,
};
use tracing::debug;

/// Rule code for unused-module-dependency.
pub const CODE: &str = "DS001";

/// Rule name for unused-module-dependency.
pub const NAME: &str = "unused-module-dependency";

/// Reports declared module dependencies that no import uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedModuleDependencies;

impl UnusedModuleDependencies {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DependencyRule for UnusedModuleDependencies {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Detects module dependencies whose packages are never imported"
    }

    fn check(
        &self,
        graph: &mut DependencyGraph<'_>,
        module: &ModuleDescriptor,
    ) -> Result<Vec<Violation>, AnalysisError> {
        let dependencies = graph.internal_dependencies(&module.id)?;
        if dependencies.is_empty() {
            return Ok(Vec::new());
        }
        let settings = graph.config().module_settings(&module.id);
        let imports = graph.source_imports(module)?;

        let mut violations = Vec::new();
        for dependency in dependencies {
            let packages = graph.module_packages(&dependency.id)?;
            if imports_any_package(&packages, &imports) {
                continue;
            }
            if settings.is_ignored(dependency.id.as_str()) {
                debug!(module = %module.id, dependency = %dependency.id, "ignored");
                continue;
            }
            let kind = match graph.find_transitive_source_module(&dependency.id, &imports)? {
                Some(replacement) => ViolationKind::UnusedModuleWithReplacement { replacement },
                None => ViolationKind::TotallyUnusedModule,
            };
            violations.push(Violation::new(
                CODE,
                NAME,
                module.display_name(),
                dependency.id.as_str(),
                kind,
            ));
        }
        Ok(violations)
    }
}
