//! The default rule set.

use crate::{CustomDependencyCheck, UnusedLibraryDependencies, UnusedModuleDependencies};
use dep_seeker_core::{Config, ConfigError, CustomCheck, RuleBox};

/// Rules run on every module, in order: DS001, DS002, then one DS100 per
/// custom check (declared in `config` first, then `extra_checks`).
///
/// # Errors
///
/// Returns an error if a declared custom check has an invalid `library` glob.
pub fn default_rules(
    config: &Config,
    extra_checks: impl IntoIterator<Item = CustomCheck>,
) -> Result<Vec<RuleBox>, ConfigError> {
    let mut rules: Vec<RuleBox> = vec![
        Box::new(UnusedModuleDependencies::new()),
        Box::new(UnusedLibraryDependencies::new()),
    ];
    for declared in &config.custom_checks {
        rules.push(Box::new(CustomDependencyCheck::new(CustomCheck::from_config(
            declared,
        )?)));
    }
    rules.extend(
        extra_checks
            .into_iter()
            .map(|check| Box::new(CustomDependencyCheck::new(check)) as RuleBox),
    );
    Ok(rules)
}

/// One instance of every built-in rule, for listing.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(UnusedModuleDependencies::new()),
        Box::new(UnusedLibraryDependencies::new()),
        Box::new(CustomDependencyCheck::new(CustomCheck::new(
            crate::custom_dependency_check::NAME,
            |_, _| String::new(),
        ))),
    ]
}
