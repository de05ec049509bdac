//! Adapter running a [`CustomCheck`] against every library of a module.

use dep_seeker_core::{
    AnalysisError, CustomCheck, DependencyGraph, DependencyRule, ModuleDescriptor, Violation,
    ViolationKind,
};
use tracing::debug;

/// Rule code for custom checks.
pub const CODE: &str = "DS100";

/// Rule name for custom checks.
pub const NAME: &str = "custom-check";

/// Reports whatever text a custom check returns, verbatim.
#[derive(Debug, Clone)]
pub struct CustomDependencyCheck {
    check: CustomCheck,
}

impl CustomDependencyCheck {
    /// Wraps `check` as a rule.
    #[must_use]
    pub fn new(check: CustomCheck) -> Self {
        Self { check }
    }

    /// Name of the wrapped check.
    #[must_use]
    pub fn check_name(&self) -> &str {
        self.check.name()
    }
}

impl DependencyRule for CustomDependencyCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Runs a user-supplied check against each external library"
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
        let metadata = graph.module_metadata(module)?;

        let mut violations = Vec::new();
        for library in libraries.iter() {
            let message = self.check.evaluate(&metadata, library);
            if message.is_empty() {
                continue;
            }
            debug!(check = self.check_name(), library = %library.full_name, "custom check fired");
            violations.push(Violation::new(
                CODE,
                NAME,
                module.display_name(),
                library.full_name.clone(),
                ViolationKind::CustomCheck { message },
            ));
        }
        Ok(violations)
    }
}
