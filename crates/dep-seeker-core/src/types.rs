//! Core types for lint violations and results.

use crate::model::ModuleId;
use serde::Serialize;
use std::fmt;

/// What a violation reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A custom check returned diagnostic text.
    CustomCheck {
        /// The text returned by the check, reported verbatim.
        message: String,
    },
    /// A sibling module is declared but none of its packages are imported.
    TotallyUnusedModule,
    /// A sibling module is declared, but what is used actually comes from
    /// one of its own dependencies.
    UnusedModuleWithReplacement {
        /// Module that supplies the used symbols.
        replacement: ModuleId,
    },
    /// An external library is declared but none of its classes are imported.
    UnusedLibrary,
}

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    /// Rule code (e.g. "DS001").
    pub code: &'static str,
    /// Rule name (e.g. "unused-module-dependency").
    pub rule: &'static str,
    /// Display name of the offending module.
    pub module: String,
    /// Offending dependency, as a module id or full coordinate.
    pub dependency: String,
    /// What was found.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: &'static str,
        rule: &'static str,
        module: impl Into<String>,
        dependency: impl Into<String>,
        kind: ViolationKind,
    ) -> Self {
        Self {
            code,
            rule,
            module: module.into(),
            dependency: dependency.into(),
            kind,
        }
    }

    /// Renders the report line for this violation.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            module, dependency, ..
        } = self;
        match &self.kind {
            ViolationKind::CustomCheck { message } => f.write_str(message),
            ViolationKind::TotallyUnusedModule => {
                write!(f, "Module {module} declares unused dependency {dependency}")
            }
            ViolationKind::UnusedModuleWithReplacement { replacement } => write!(
                f,
                "Module {module} doesn't use {dependency}, replace it with {replacement}"
            ),
            ViolationKind::UnusedLibrary => {
                write!(f, "Module {module} declared unused dependency {dependency}")
            }
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// All violations found, in module order then rule order.
    pub violations: Vec<Violation>,
    /// Number of modules analyzed.
    pub modules_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no violations.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Report lines, one per violation, blank lines dropped.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(Violation::message)
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_totally_unused_module() {
        let v = Violation::new(
            "DS001",
            "unused-module-dependency",
            ":feature-impl2",
            ":feature-api2",
            ViolationKind::TotallyUnusedModule,
        );
        insta::assert_snapshot!(v.message(), @"Module :feature-impl2 declares unused dependency :feature-api2");
    }

    #[test]
    fn renders_replacement_suggestion() {
        let v = Violation::new(
            "DS001",
            "unused-module-dependency",
            ":app",
            ":feature-impl1",
            ViolationKind::UnusedModuleWithReplacement {
                replacement: ModuleId::new(":feature-api1"),
            },
        );
        insta::assert_snapshot!(v.message(), @"Module :app doesn't use :feature-impl1, replace it with :feature-api1");
    }

    #[test]
    fn renders_unused_library() {
        let v = Violation::new(
            "DS002",
            "unused-library-dependency",
            ":app",
            "com.squareup.okio:okio:3.6.0",
            ViolationKind::UnusedLibrary,
        );
        insta::assert_snapshot!(v.message(), @"Module :app declared unused dependency com.squareup.okio:okio:3.6.0");
    }

    #[test]
    fn custom_check_text_is_verbatim() {
        let v = Violation::new(
            "DS100",
            "custom-check",
            ":app",
            "g:a:1",
            ViolationKind::CustomCheck {
                message: "anything at all".to_string(),
            },
        );
        assert_eq!(v.message(), "anything at all");
    }

    #[test]
    fn lines_drop_blank_entries() {
        let mut result = LintResult::new();
        result.violations.push(Violation::new(
            "DS100",
            "custom-check",
            ":app",
            "g:a:1",
            ViolationKind::CustomCheck {
                message: "   ".to_string(),
            },
        ));
        result.violations.push(Violation::new(
            "DS002",
            "unused-library-dependency",
            ":app",
            "g:a:1",
            ViolationKind::UnusedLibrary,
        ));
        assert_eq!(result.lines().len(), 1);
    }

    #[test]
    fn json_shape_is_flat() {
        let v = Violation::new(
            "DS001",
            "unused-module-dependency",
            ":app",
            ":core",
            ViolationKind::TotallyUnusedModule,
        );
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "totally_unused_module");
        assert_eq!(json["module"], ":app");
        assert_eq!(json["code"], "DS001");
    }
}
