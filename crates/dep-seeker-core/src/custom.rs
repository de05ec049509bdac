//! User-supplied checks over a module and one of its libraries.

use crate::config::{ConfigError, CustomCheckConfig};
use crate::metadata::{LibraryContent, ModuleMetadata};
use std::fmt;
use std::sync::Arc;

type CheckFn = dyn Fn(&ModuleMetadata, &LibraryContent) -> String + Send + Sync;

/// A named predicate returning diagnostic text, or an empty string when the
/// library is fine.
#[derive(Clone)]
pub struct CustomCheck {
    name: String,
    check: Arc<CheckFn>,
}

impl CustomCheck {
    /// Wraps a predicate.
    ///
    /// ```
    /// use dep_seeker_core::CustomCheck;
    ///
    /// let check = CustomCheck::new("no-guava", |module, library| {
    ///     if library.full_name.starts_with("com.google.guava:") {
    ///         format!("{} should not use Guava", module.name)
    ///     } else {
    ///         String::new()
    ///     }
    /// });
    /// assert_eq!(check.name(), "no-guava");
    /// ```
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&ModuleMetadata, &LibraryContent) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Builds a check from a `[[custom_checks]]` table.
    ///
    /// The check reports its message for every library whose full name
    /// matches the `library` glob.
    ///
    /// # Errors
    ///
    /// Returns an error if the `library` pattern is not a valid glob.
    pub fn from_config(config: &CustomCheckConfig) -> Result<Self, ConfigError> {
        let pattern = config.library_pattern()?;
        let template = config.message.clone();
        Ok(Self::new(config.name.clone(), move |module, library| {
            if pattern.matches(&library.full_name) {
                template
                    .replace("{module}", &module.name)
                    .replace("{library}", &library.full_name)
            } else {
                String::new()
            }
        }))
    }

    /// Check name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the predicate.
    #[must_use]
    pub fn evaluate(&self, module: &ModuleMetadata, library: &LibraryContent) -> String {
        (self.check)(module, library)
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCheck")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
