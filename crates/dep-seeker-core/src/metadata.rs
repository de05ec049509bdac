//! Records produced by the dependency graph and handed to rules.

use crate::extractor::{FileSymbols, SourceLanguage};
use crate::model::{Coordinate, ModuleId, ResolvedDependency};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

/// One source file of a module, read and scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path on disk.
    pub path: PathBuf,
    /// File name without directories.
    pub name: String,
    /// Source dialect.
    pub language: SourceLanguage,
    /// File text, decoded lossily.
    pub content: String,
    /// Extracted imports and package.
    pub symbols: FileSymbols,
}

/// An external library edge that survived configuration and directness filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalDependency {
    /// Coordinate as declared in the build script.
    pub declared: Coordinate,
    /// What resolution actually selected for it.
    pub resolved: ResolvedDependency,
}

impl ExternalDependency {
    /// Full `group:artifact:version` of the resolved library.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.resolved.coordinate.to_string()
    }
}

/// A library together with the classes it ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryContent {
    /// Full `group:artifact:version` of the resolved library.
    pub full_name: String,
    /// Coordinate as declared in the build script.
    pub declared: Coordinate,
    /// Fully-qualified class names found in its artifacts.
    pub symbols: Arc<BTreeSet<String>>,
}

/// A module-to-module edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternalDependency {
    /// Target module.
    pub id: ModuleId,
    /// Target module directory, kept for diagnostics.
    pub locator: PathBuf,
}

/// Source view of a module given to custom checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleMetadata {
    /// Module display name.
    pub name: String,
    /// Every source file of the module.
    pub sources: Vec<SourceFileMetadata>,
}

/// Source view of one file given to custom checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFileMetadata {
    /// File name.
    pub name: String,
    /// File text.
    pub content: String,
    /// Imports of this file.
    pub imports: Vec<String>,
}

impl From<&SourceFile> for SourceFileMetadata {
    fn from(file: &SourceFile) -> Self {
        Self {
            name: file.name.clone(),
            content: file.content.clone(),
            imports: file.symbols.imports.clone(),
        }
    }
}
