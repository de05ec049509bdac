//! Rule trait for defining dependency-usage checks.

use crate::error::AnalysisError;
use crate::graph::DependencyGraph;
use crate::model::ModuleDescriptor;
use crate::types::Violation;

/// A check run once per analyzed module.
///
/// Rules read everything they need through the shared [`DependencyGraph`],
/// which memoizes sources, resolution and archive contents across rules and
/// modules.
///
/// # Example
///
/// ```ignore
/// use dep_seeker_core::{AnalysisError, DependencyGraph, DependencyRule, ModuleDescriptor, Violation};
///
/// pub struct NoEmptyModules;
///
/// impl DependencyRule for NoEmptyModules {
///     fn name(&self) -> &'static str { "no-empty-modules" }
///     fn code(&self) -> &'static str { "DS900" }
///
///     fn check(
///         &self,
///         graph: &mut DependencyGraph<'_>,
///         module: &ModuleDescriptor,
///     ) -> Result<Vec<Violation>, AnalysisError> {
///         let files = graph.source_files(module)?;
///         Ok(if files.is_empty() { vec![/* ... */] } else { vec![] })
///     }
/// }
/// ```
pub trait DependencyRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "unused-library-dependency").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DS002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks one module.
    ///
    /// # Errors
    ///
    /// Propagates graph failures; findings are returned, never raised.
    fn check(
        &self,
        graph: &mut DependencyGraph<'_>,
        module: &ModuleDescriptor,
    ) -> Result<Vec<Violation>, AnalysisError>;
}

/// Type alias for boxed rule trait objects.
pub type RuleBox = Box<dyn DependencyRule>;
