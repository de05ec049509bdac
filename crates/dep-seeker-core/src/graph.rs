//! Cache-backed view of a project's dependency graph.
//!
//! [`DependencyGraph`] owns every memoization table of one analysis run.
//! Two graph-wide maps (module edges and package sets) are built once by
//! [`DependencyGraph::initialize`]; everything else is computed on first
//! request and kept until the graph is dropped.

use crate::archive;
use crate::config::Config;
use crate::error::AnalysisError;
use crate::extractor::{self, SourceLanguage};
use crate::metadata::{
    ExternalDependency, InternalDependency, LibraryContent, ModuleMetadata, SourceFile,
    SourceFileMetadata,
};
use crate::model::{Configuration, Coordinate, ModuleDescriptor, ModuleId, ResolvedDependency};
use crate::provider::BuildGraphProvider;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Configuration kinds whose dependencies are analyzed (lowercase substrings).
pub const ACCEPTED_CONFIGURATION_KINDS: [&str; 4] =
    ["runtimeclasspath", "compileclasspath", "implementation", "api"];

/// Configuration kinds never analyzed (lowercase substrings).
pub const EXCLUDED_CONFIGURATION_KINDS: [&str; 1] = ["annotationprocessor"];

const METADATA_CONFIGURATION_SUFFIX: &str = "DependenciesMetadata";

/// Whether external dependencies of `configuration` are analyzed.
#[must_use]
pub fn is_accepted_configuration(configuration: &Configuration) -> bool {
    let name = configuration.name.to_lowercase();
    configuration.can_be_resolved
        && !configuration.name.ends_with(METADATA_CONFIGURATION_SUFFIX)
        && ACCEPTED_CONFIGURATION_KINDS
            .iter()
            .any(|kind| name.contains(kind))
        && !EXCLUDED_CONFIGURATION_KINDS
            .iter()
            .any(|kind| name.contains(kind))
}

/// Whether module edges of `configuration` are part of the internal graph.
#[must_use]
pub fn is_production_configuration(configuration: &Configuration) -> bool {
    !configuration.name.to_lowercase().contains("test")
}

/// Whether some import starts with one of `packages`.
#[must_use]
pub fn imports_any_package(packages: &BTreeSet<String>, imports: &[String]) -> bool {
    packages
        .iter()
        .any(|package| imports.iter().any(|import| import.starts_with(package.as_str())))
}

/// Graph-wide maps built by [`DependencyGraph::initialize`].
#[derive(Debug, Default)]
struct GraphIndex {
    internal: HashMap<ModuleId, IndexSet<InternalDependency>>,
    packages: HashMap<ModuleId, Arc<BTreeSet<String>>>,
}

/// Dependency facts for one analysis run.
pub struct DependencyGraph<'a> {
    provider: &'a dyn BuildGraphProvider,
    config: &'a Config,
    exclude: Vec<glob::Pattern>,
    index: Option<GraphIndex>,
    sources: HashMap<ModuleId, Arc<Vec<SourceFile>>>,
    imports: HashMap<ModuleId, Arc<Vec<String>>>,
    external: HashMap<ModuleId, Arc<Vec<ExternalDependency>>>,
    libraries: HashMap<ModuleId, Arc<Vec<LibraryContent>>>,
    library_symbols: HashMap<String, Arc<BTreeSet<String>>>,
}

impl<'a> DependencyGraph<'a> {
    /// Creates an uninitialized graph over `provider`.
    #[must_use]
    pub fn new(provider: &'a dyn BuildGraphProvider, config: &'a Config) -> Self {
        Self {
            provider,
            config,
            exclude: Vec::new(),
            index: None,
            sources: HashMap::new(),
            imports: HashMap::new(),
            external: HashMap::new(),
            libraries: HashMap::new(),
            library_symbols: HashMap::new(),
        }
    }

    /// The configuration this graph applies.
    #[must_use]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// The project modules, in project order.
    #[must_use]
    pub fn modules(&self) -> &'a [ModuleDescriptor] {
        let provider = self.provider;
        provider.modules()
    }

    /// Walks every module once, recording its module edges (self references
    /// and test configurations excluded) and its declared packages.
    ///
    /// Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is invalid or sources cannot be read.
    pub fn initialize(&mut self) -> Result<(), AnalysisError> {
        if self.index.is_some() {
            return Ok(());
        }
        self.exclude = self.config.exclude_patterns()?;

        let provider = self.provider;
        let mut index = GraphIndex::default();
        for module in provider.modules() {
            let mut edges = IndexSet::new();
            for configuration in module
                .configurations
                .iter()
                .filter(|c| is_production_configuration(c))
            {
                for target in configuration.module_dependencies() {
                    if target == &module.id {
                        continue;
                    }
                    let locator = match provider.module(target) {
                        Some(found) => found.project_dir.clone(),
                        None => {
                            warn!(module = %module.id, dependency = %target, "dependency on unknown module");
                            PathBuf::new()
                        }
                    };
                    edges.insert(InternalDependency {
                        id: target.clone(),
                        locator,
                    });
                }
            }

            let packages: BTreeSet<String> = self
                .load_sources(module)?
                .iter()
                .map(|file| file.symbols.package.clone())
                .filter(|package| !package.is_empty())
                .collect();

            debug!(
                module = %module.id,
                dependencies = edges.len(),
                packages = packages.len(),
                "indexed module"
            );
            index.internal.insert(module.id.clone(), edges);
            index.packages.insert(module.id.clone(), Arc::new(packages));
        }
        self.index = Some(index);
        Ok(())
    }

    fn index(&self) -> Result<&GraphIndex, AnalysisError> {
        self.index.as_ref().ok_or(AnalysisError::Uninitialized)
    }

    /// Declared module edges of `id`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Uninitialized`] before initialization.
    pub fn internal_dependencies(&self, id: &ModuleId) -> Result<Vec<InternalDependency>, AnalysisError> {
        Ok(self
            .index()?
            .internal
            .get(id)
            .map(|edges| edges.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Packages declared by the sources of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Uninitialized`] before initialization.
    pub fn module_packages(&self, id: &ModuleId) -> Result<Arc<BTreeSet<String>>, AnalysisError> {
        Ok(self
            .index()?
            .packages
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    /// Modules that `module` declares a dependency on.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Uninitialized`] before initialization.
    pub fn dependent_modules(
        &self,
        module: &ModuleDescriptor,
    ) -> Result<Vec<&'a ModuleDescriptor>, AnalysisError> {
        let provider = self.provider;
        Ok(self
            .internal_dependencies(&module.id)?
            .iter()
            .filter_map(|dependency| provider.module(&dependency.id))
            .collect())
    }

    /// Searches the module graph below `start` for the module whose packages
    /// are imported by `imports`.
    ///
    /// Direct dependencies of a module are checked before any of them is
    /// descended into; the first match wins. Each module is visited once.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Uninitialized`] before initialization.
    pub fn find_transitive_source_module(
        &self,
        start: &ModuleId,
        imports: &[String],
    ) -> Result<Option<ModuleId>, AnalysisError> {
        let index = self.index()?;
        let mut visited = HashSet::new();
        Ok(search_source_module(index, start, imports, &mut visited))
    }

    /// Source files of `module`.
    ///
    /// # Errors
    ///
    /// Returns an error before initialization or if sources cannot be read.
    pub fn source_files(
        &mut self,
        module: &ModuleDescriptor,
    ) -> Result<Arc<Vec<SourceFile>>, AnalysisError> {
        self.index()?;
        self.load_sources(module)
    }

    /// Imports of every source file of `module`, deduplicated in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error before initialization or if sources cannot be read.
    pub fn source_imports(
        &mut self,
        module: &ModuleDescriptor,
    ) -> Result<Arc<Vec<String>>, AnalysisError> {
        if let Some(cached) = self.imports.get(&module.id) {
            return Ok(Arc::clone(cached));
        }
        let files = self.source_files(module)?;
        let imports: IndexSet<String> = files
            .iter()
            .flat_map(|file| file.symbols.imports.iter().cloned())
            .collect();
        let imports = Arc::new(imports.into_iter().collect::<Vec<_>>());
        self.imports.insert(module.id.clone(), Arc::clone(&imports));
        Ok(imports)
    }

    /// Source view of `module` for custom checks.
    ///
    /// # Errors
    ///
    /// Returns an error before initialization or if sources cannot be read.
    pub fn module_metadata(
        &mut self,
        module: &ModuleDescriptor,
    ) -> Result<ModuleMetadata, AnalysisError> {
        let files = self.source_files(module)?;
        Ok(ModuleMetadata {
            name: module.display_name().to_string(),
            sources: files.iter().map(SourceFileMetadata::from).collect(),
        })
    }

    /// External libraries `module` requests directly through an analyzed
    /// configuration, minus ignored ones.
    ///
    /// # Errors
    ///
    /// Returns an error before initialization, or
    /// [`AnalysisError::AmbiguousResolution`] if a declared coordinate does
    /// not map to exactly one resolved dependency.
    pub fn resolve_external_dependencies(
        &mut self,
        module: &ModuleDescriptor,
    ) -> Result<Arc<Vec<ExternalDependency>>, AnalysisError> {
        self.index()?;
        if let Some(cached) = self.external.get(&module.id) {
            return Ok(Arc::clone(cached));
        }

        let requester = module.full_name();
        // One entry per resolved library, whichever configurations select it.
        let mut found: IndexMap<Coordinate, ExternalDependency> = IndexMap::new();
        for configuration in module
            .configurations
            .iter()
            .filter(|c| is_accepted_configuration(c))
        {
            let direct: Vec<&ResolvedDependency> = configuration
                .resolved
                .iter()
                .filter(|resolved| resolved.is_requested_by(&requester))
                .collect();
            for declared in configuration.external_dependencies() {
                let resolved = match_resolved(module, declared, &direct)?;
                match found.entry(resolved.coordinate.clone()) {
                    Entry::Occupied(mut entry) => {
                        let merged = &mut entry.get_mut().resolved;
                        for artifact in &resolved.artifacts {
                            if !merged.artifacts.contains(artifact) {
                                merged.artifacts.push(artifact.clone());
                            }
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(ExternalDependency {
                            declared: declared.clone(),
                            resolved: resolved.clone(),
                        });
                    }
                }
            }
        }

        let settings = self.config.module_settings(&module.id);
        let dependencies: Vec<ExternalDependency> = found
            .into_values()
            .filter(|dependency| {
                let ignored = settings.is_ignored(&dependency.full_name());
                if ignored {
                    trace!(module = %module.id, dependency = %dependency.full_name(), "ignored");
                }
                !ignored
            })
            .collect();
        debug!(
            module = %module.id,
            dependencies = dependencies.len(),
            "resolved external dependencies"
        );
        let dependencies = Arc::new(dependencies);
        self.external
            .insert(module.id.clone(), Arc::clone(&dependencies));
        Ok(dependencies)
    }

    /// Classes shipped by each resolved external dependency of `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails or an artifact cannot be indexed.
    pub fn resolve_library_contents(
        &mut self,
        module: &ModuleDescriptor,
    ) -> Result<Arc<Vec<LibraryContent>>, AnalysisError> {
        if let Some(cached) = self.libraries.get(&module.id) {
            return Ok(Arc::clone(cached));
        }
        let dependencies = self.resolve_external_dependencies(module)?;
        let mut contents = Vec::with_capacity(dependencies.len());
        for dependency in dependencies.iter() {
            contents.push(LibraryContent {
                full_name: dependency.full_name(),
                declared: dependency.declared.clone(),
                symbols: self.library_symbols(&dependency.resolved)?,
            });
        }
        let contents = Arc::new(contents);
        self.libraries.insert(module.id.clone(), Arc::clone(&contents));
        Ok(contents)
    }

    /// Union of the classes in every artifact backing `resolved`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Archive`] if an artifact cannot be read.
    pub fn library_symbols(
        &mut self,
        resolved: &ResolvedDependency,
    ) -> Result<Arc<BTreeSet<String>>, AnalysisError> {
        let key = resolved.coordinate.to_string();
        if let Some(cached) = self.library_symbols.get(&key) {
            return Ok(Arc::clone(cached));
        }
        let mut symbols = BTreeSet::new();
        for artifact in &resolved.artifacts {
            let found = archive::archive_symbols(artifact).map_err(|source| {
                AnalysisError::Archive {
                    path: artifact.clone(),
                    source,
                }
            })?;
            symbols.extend(found);
        }
        debug!(library = %key, symbols = symbols.len(), "indexed library");
        let symbols = Arc::new(symbols);
        self.library_symbols.insert(key, Arc::clone(&symbols));
        Ok(symbols)
    }

    fn load_sources(
        &mut self,
        module: &ModuleDescriptor,
    ) -> Result<Arc<Vec<SourceFile>>, AnalysisError> {
        if let Some(cached) = self.sources.get(&module.id) {
            return Ok(Arc::clone(cached));
        }
        let mut files = Vec::new();
        for root in module.source_dirs() {
            if !root.exists() {
                trace!(module = %module.id, root = %root.display(), "missing source root");
                continue;
            }
            for entry in WalkDir::new(&root).sort_by_file_name() {
                let entry = entry.map_err(|e| AnalysisError::SourceRead {
                    path: e.path().map_or_else(|| root.clone(), Path::to_path_buf),
                    source: e.into(),
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                let Some(language) = SourceLanguage::from_path(path) else {
                    continue;
                };
                if self.is_excluded(&module.project_dir, path) {
                    trace!(path = %path.display(), "excluded");
                    continue;
                }
                files.push(read_source(path, language)?);
            }
        }
        debug!(module = %module.id, files = files.len(), "loaded sources");
        let files = Arc::new(files);
        self.sources.insert(module.id.clone(), Arc::clone(&files));
        Ok(files)
    }

    fn is_excluded(&self, project_dir: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(project_dir).unwrap_or(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

fn read_source(path: &Path, language: SourceLanguage) -> Result<SourceFile, AnalysisError> {
    let bytes = std::fs::read(path).map_err(|source| AnalysisError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    trace!(path = %path.display(), language = language.id(), "read source");
    let symbols = extractor::analyze(language, &content);
    Ok(SourceFile {
        path: path.to_path_buf(),
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        language,
        content,
        symbols,
    })
}

fn match_resolved<'r>(
    module: &ModuleDescriptor,
    declared: &Coordinate,
    direct: &[&'r ResolvedDependency],
) -> Result<&'r ResolvedDependency, AnalysisError> {
    if let Some(exact) = direct.iter().find(|r| &r.coordinate == declared) {
        return Ok(*exact);
    }
    trace!(key = %declared.module_key(), "no exact match, trying group:artifact");
    let candidates: Vec<&'r ResolvedDependency> = direct
        .iter()
        .copied()
        .filter(|r| r.coordinate.same_module(declared))
        .collect();
    match candidates.as_slice() {
        [only] => Ok(*only),
        _ => Err(AnalysisError::AmbiguousResolution {
            module: module.id.clone(),
            dependency: declared.clone(),
            candidates: candidates
                .iter()
                .map(|r| r.coordinate.to_string())
                .collect(),
        }),
    }
}

fn search_source_module(
    index: &GraphIndex,
    current: &ModuleId,
    imports: &[String],
    visited: &mut HashSet<ModuleId>,
) -> Option<ModuleId> {
    if !visited.insert(current.clone()) {
        return None;
    }
    let dependencies = index.internal.get(current)?;
    let supplier = dependencies.iter().find(|dependency| {
        index
            .packages
            .get(&dependency.id)
            .is_some_and(|packages| imports_any_package(packages, imports))
    });
    if let Some(supplier) = supplier {
        return Some(supplier.id.clone());
    }
    dependencies
        .iter()
        .find_map(|dependency| search_source_module(index, &dependency.id, imports, visited))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeclaredDependency;
    use crate::provider::ManifestGraph;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_source(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_jar(path: &Path, classes: &[&str]) {
        let mut writer = zip::ZipWriter::new(fs::File::create(path).unwrap());
        for class in classes {
            writer
                .start_file(format!("{}.class", class.replace('.', "/")), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"").unwrap();
        }
        writer.finish().unwrap();
    }

    fn module(root: &TempDir, id: &str) -> ModuleDescriptor {
        let name = id.trim_start_matches(':');
        ModuleDescriptor::new(id, root.path().join(name)).with_gav("com.example", name, "1.0")
    }

    fn implementation(targets: &[&str]) -> Configuration {
        Configuration {
            name: "implementation".to_string(),
            can_be_resolved: false,
            dependencies: targets
                .iter()
                .map(|t| DeclaredDependency::Module(ModuleId::new(*t)))
                .collect(),
            resolved: Vec::new(),
        }
    }

    fn classpath(
        name: &str,
        declared: &[&str],
        resolved: Vec<ResolvedDependency>,
    ) -> Configuration {
        Configuration {
            name: name.to_string(),
            can_be_resolved: true,
            dependencies: declared
                .iter()
                .map(|c| DeclaredDependency::External(c.parse().unwrap()))
                .collect(),
            resolved,
        }
    }

    fn resolved(coordinate: &str, requester: &str, artifacts: Vec<PathBuf>) -> ResolvedDependency {
        ResolvedDependency {
            coordinate: coordinate.parse().unwrap(),
            requested_by: vec![requester.to_string()],
            artifacts,
        }
    }

    #[test]
    fn queries_fail_before_initialize() {
        let root = tempfile::tempdir().unwrap();
        let app = module(&root, ":app");
        let provider = ManifestGraph::new(vec![app.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);

        assert!(matches!(
            graph.internal_dependencies(&app.id),
            Err(AnalysisError::Uninitialized)
        ));
        assert!(matches!(
            graph.source_imports(&app),
            Err(AnalysisError::Uninitialized)
        ));
        assert!(matches!(
            graph.resolve_external_dependencies(&app),
            Err(AnalysisError::Uninitialized)
        ));
        assert!(matches!(
            graph.find_transitive_source_module(&app.id, &[]),
            Err(AnalysisError::Uninitialized)
        ));
    }

    #[test]
    fn initialize_skips_self_and_test_edges() {
        let root = tempfile::tempdir().unwrap();
        let app = module(&root, ":app")
            .with_configuration(implementation(&[":app", ":core"]))
            .with_configuration(Configuration {
                name: "testImplementation".to_string(),
                ..implementation(&[":testing"])
            });
        let core = module(&root, ":core");
        let testing = module(&root, ":testing");
        let provider = ManifestGraph::new(vec![app.clone(), core.clone(), testing]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        let edges = graph.internal_dependencies(&app.id).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id, core.id);
        assert_eq!(edges[0].locator, core.project_dir);

        let dependents = graph.dependent_modules(&app).unwrap();
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].id, core.id);
    }

    #[test]
    fn packages_and_imports_come_from_sources() {
        let root = tempfile::tempdir().unwrap();
        let core = module(&root, ":core");
        write_source(
            &core.project_dir,
            "src/main/kotlin/A.kt",
            "package com.example.core\n\nimport okio.Buffer\nimport com.example.util.Log\n",
        );
        write_source(
            &core.project_dir,
            "src/main/java/B.java",
            "package com.example.core.internal;\n\nimport okio.Buffer;\nimport java.util.List;\n",
        );
        write_source(&core.project_dir, "src/main/kotlin/Script.kt", "println(\"no package\")\n");
        write_source(&core.project_dir, "src/main/res/values.xml", "<resources/>");
        let provider = ManifestGraph::new(vec![core.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        let packages = graph.module_packages(&core.id).unwrap();
        let expected: BTreeSet<String> = ["com.example.core", "com.example.core.internal"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(*packages, expected);

        let imports = graph.source_imports(&core).unwrap();
        assert_eq!(
            *imports,
            vec!["okio.Buffer", "java.util.List", "com.example.util.Log"]
        );

        let metadata = graph.module_metadata(&core).unwrap();
        assert_eq!(metadata.name, ":core");
        assert_eq!(metadata.sources.len(), 3);
    }

    #[test]
    fn excluded_sources_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        let core = module(&root, ":core");
        write_source(&core.project_dir, "src/main/A.kt", "package a\nimport x.Y\n");
        write_source(&core.project_dir, "src/generated/B.kt", "package b\nimport z.W\n");
        let provider = ManifestGraph::new(vec![core.clone()]).unwrap();
        let config = Config::parse("[analyzer]\nexclude = [\"**/generated/**\"]\n").unwrap();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        assert_eq!(*graph.source_imports(&core).unwrap(), vec!["x.Y"]);
        assert_eq!(graph.module_packages(&core.id).unwrap().len(), 1);
    }

    #[test]
    fn external_resolution_prefers_exact_then_unique_module() {
        let root = tempfile::tempdir().unwrap();
        let requester = "com.example:app:1.0";
        let app = module(&root, ":app").with_configuration(classpath(
            "releaseRuntimeClasspath",
            &["com.squareup.okio:okio:3.6.0", "com.google.code.gson:gson:2.9.0"],
            vec![
                resolved("com.squareup.okio:okio:3.6.0", requester, vec![]),
                resolved("com.google.code.gson:gson:2.10.1", requester, vec![]),
                resolved("org.jetbrains:annotations:13.0", "com.squareup.okio:okio:3.6.0", vec![]),
            ],
        ));
        let provider = ManifestGraph::new(vec![app.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        let deps = graph.resolve_external_dependencies(&app).unwrap();
        let names: Vec<String> = deps.iter().map(ExternalDependency::full_name).collect();
        assert_eq!(
            names,
            vec!["com.squareup.okio:okio:3.6.0", "com.google.code.gson:gson:2.10.1"]
        );
        assert_eq!(deps[1].declared.version, "2.9.0");
    }

    #[test]
    fn library_in_several_classpaths_is_resolved_once() {
        let root = tempfile::tempdir().unwrap();
        let requester = "com.example:app:1.0";
        let okio = "com.squareup.okio:okio:3.6.0";
        let runtime = root.path().join("okio-runtime.jar");
        let compile = root.path().join("okio-compile.jar");
        let app = module(&root, ":app")
            .with_configuration(classpath(
                "releaseRuntimeClasspath",
                &[okio],
                vec![resolved(okio, requester, vec![runtime.clone()])],
            ))
            .with_configuration(classpath(
                "releaseCompileClasspath",
                &[okio],
                vec![resolved(okio, requester, vec![compile.clone(), runtime.clone()])],
            ));
        let provider = ManifestGraph::new(vec![app.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        let deps = graph.resolve_external_dependencies(&app).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].full_name(), okio);
        assert_eq!(deps[0].resolved.artifacts, vec![runtime, compile]);
    }

    #[test]
    fn ambiguous_resolution_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let requester = "com.example:app:1.0";
        let app = module(&root, ":app").with_configuration(classpath(
            "debugCompileClasspath",
            &["com.squareup.okio:okio:3.0.0"],
            vec![
                resolved("com.squareup.okio:okio:3.6.0", requester, vec![]),
                resolved("com.squareup.okio:okio:3.7.0", requester, vec![]),
            ],
        ));
        let provider = ManifestGraph::new(vec![app.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        match graph.resolve_external_dependencies(&app) {
            Err(AnalysisError::AmbiguousResolution { candidates, .. }) => {
                assert_eq!(
                    candidates,
                    vec!["com.squareup.okio:okio:3.6.0", "com.squareup.okio:okio:3.7.0"]
                );
            }
            other => panic!("expected ambiguous resolution, got {other:?}"),
        }
    }

    #[test]
    fn configuration_filter() {
        let accepted = |name: &str, can_be_resolved: bool| {
            is_accepted_configuration(&Configuration {
                name: name.to_string(),
                can_be_resolved,
                ..Configuration::default()
            })
        };
        assert!(accepted("releaseRuntimeClasspath", true));
        assert!(accepted("debugCompileClasspath", true));
        assert!(accepted("api", true));
        assert!(!accepted("implementation", false));
        assert!(!accepted("kaptAnnotationProcessorClasspath", true));
        assert!(!accepted("releaseApiDependenciesMetadata", true));
        assert!(!accepted("lintChecks", true));
    }

    #[test]
    fn ignored_libraries_are_dropped() {
        let root = tempfile::tempdir().unwrap();
        let requester = "com.example:app:1.0";
        let app = module(&root, ":app").with_configuration(classpath(
            "releaseRuntimeClasspath",
            &["com.squareup.okio:okio:3.6.0"],
            vec![resolved("com.squareup.okio:okio:3.6.0", requester, vec![])],
        ));
        let provider = ManifestGraph::new(vec![app.clone()]).unwrap();
        let config =
            Config::parse("ignored_dependencies = [\"com.squareup.okio:okio:3.6.0\"]\n").unwrap();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        assert!(graph.resolve_external_dependencies(&app).unwrap().is_empty());
    }

    #[test]
    fn library_contents_union_artifacts() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("libs")).unwrap();
        let first = root.path().join("libs/a.jar");
        let second = root.path().join("libs/b.jar");
        let pom = root.path().join("libs/a.pom");
        write_jar(&first, &["com.lib.A"]);
        write_jar(&second, &["com.lib.B"]);
        fs::write(&pom, "<project/>").unwrap();

        let requester = "com.example:app:1.0";
        let app = module(&root, ":app").with_configuration(classpath(
            "releaseRuntimeClasspath",
            &["com.lib:lib:1.0"],
            vec![resolved("com.lib:lib:1.0", requester, vec![first, second, pom])],
        ));
        let provider = ManifestGraph::new(vec![app.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        let contents = graph.resolve_library_contents(&app).unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].full_name, "com.lib:lib:1.0");
        assert!(contents[0].symbols.contains("com.lib.A"));
        assert!(contents[0].symbols.contains("com.lib.B"));
    }

    #[test]
    fn corrupt_artifact_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let jar = root.path().join("broken.jar");
        fs::write(&jar, "not a zip").unwrap();
        let requester = "com.example:app:1.0";
        let app = module(&root, ":app").with_configuration(classpath(
            "releaseRuntimeClasspath",
            &["com.lib:lib:1.0"],
            vec![resolved("com.lib:lib:1.0", requester, vec![jar])],
        ));
        let provider = ManifestGraph::new(vec![app.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        assert!(matches!(
            graph.resolve_library_contents(&app),
            Err(AnalysisError::Archive { .. })
        ));
    }

    #[test]
    fn transitive_search_checks_direct_edges_first() {
        let root = tempfile::tempdir().unwrap();
        let impl1 = module(&root, ":feature-impl1")
            .with_configuration(implementation(&[":feature-impl2", ":feature-api1"]));
        let impl2 = module(&root, ":feature-impl2").with_configuration(implementation(&[":feature-api1"]));
        let api1 = module(&root, ":feature-api1");
        write_source(&api1.project_dir, "src/Api.kt", "package com.example.api1\n");
        write_source(&impl2.project_dir, "src/Impl.kt", "package com.example.impl2\n");
        let provider = ManifestGraph::new(vec![impl1.clone(), impl2, api1.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        let imports = vec!["com.example.api1.Api".to_string()];
        assert_eq!(
            graph.find_transitive_source_module(&impl1.id, &imports).unwrap(),
            Some(api1.id.clone())
        );
        assert_eq!(
            graph
                .find_transitive_source_module(&impl1.id, &["com.other.X".to_string()])
                .unwrap(),
            None
        );
    }

    #[test]
    fn transitive_search_descends_and_survives_cycles() {
        let root = tempfile::tempdir().unwrap();
        let a = module(&root, ":a").with_configuration(implementation(&[":b"]));
        let b = module(&root, ":b").with_configuration(implementation(&[":a", ":c"]));
        let c = module(&root, ":c").with_configuration(implementation(&[":d"]));
        let d = module(&root, ":d");
        write_source(&d.project_dir, "src/D.kt", "package com.example.d\n");
        let provider = ManifestGraph::new(vec![a.clone(), b, c, d.clone()]).unwrap();
        let config = Config::default();
        let mut graph = DependencyGraph::new(&provider, &config);
        graph.initialize().unwrap();

        let imports = vec!["com.example.d.Thing".to_string()];
        assert_eq!(
            graph.find_transitive_source_module(&a.id, &imports).unwrap(),
            Some(d.id)
        );
        assert_eq!(
            graph
                .find_transitive_source_module(&a.id, &["none.Such".to_string()])
                .unwrap(),
            None
        );
    }

    #[test]
    fn prefix_helper() {
        let packages: BTreeSet<String> = ["com.example.api".to_string()].into_iter().collect();
        assert!(imports_any_package(&packages, &["com.example.api.Foo".to_string()]));
        assert!(!imports_any_package(&packages, &["com.example.Foo".to_string()]));
        assert!(!imports_any_package(&BTreeSet::new(), &["a.B".to_string()]));
    }
}
