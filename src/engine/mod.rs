//! Dependency resolution.
//!
//! Starting from the entry file, every declared dependency is resolved to a
//! logical path, loaded once, and expanded in turn. Expansion is depth-first
//! over an explicit worklist. Each module keeps the deepest rank at which it
//! was reached; a module reached again deeper than before is expanded again
//! so its dependencies move deeper too. Cycles are cut by the rank ceiling:
//! a module reached at or beyond it is disabled instead of expanded.

pub mod extract;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::DependencyCatalog;
use crate::config::BuildConfig;
use crate::diagnostics::{Diagnostics, Issue};
use crate::error::BuildError;
use crate::filter::InclusionFilter;
use crate::module::{Module, ModuleId, ModuleRegistry};
use crate::ports::filesystem::FileSystem;
use crate::resolve::PathResolver;

use self::extract::extract_dependencies;

/// Joins a logical path such as `/portal/app.js` onto the base directory.
#[must_use]
pub fn disk_path(base_path: &Path, logical_path: &str) -> PathBuf {
    base_path.join(logical_path.trim_start_matches('/'))
}

/// Roots a path given on the command line like the resolved ones:
/// `portal/app.js` and `/portal/app.js` name the same module.
#[must_use]
pub fn logical_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Everything learned by one resolution run.
#[derive(Debug)]
pub struct ResolvedGraph {
    /// Every module reached, missing ones included.
    pub registry: ModuleRegistry,
    /// Issues recorded along the way.
    pub diagnostics: Diagnostics,
    /// Final identifier to path table.
    pub resolver: PathResolver,
    /// The entry module.
    pub entry: ModuleId,
}

/// Pending expansion: an identifier and the rank it is reached at.
type WorkItem = (String, u32);

/// Owns all mutable state of one resolution run.
pub struct ResolutionEngine<'a> {
    fs: &'a dyn FileSystem,
    base_path: PathBuf,
    app_name: String,
    ceiling: u32,
    catalog: DependencyCatalog,
    filter: InclusionFilter,
    resolver: PathResolver,
    registry: ModuleRegistry,
    diagnostics: Diagnostics,
}

impl<'a> ResolutionEngine<'a> {
    /// Prepares a run for `config`, reading files relative to `base_path`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidDependType`] if a configured keyword
    /// cannot be compiled into a declaration pattern.
    pub fn new(
        fs: &'a dyn FileSystem,
        config: &BuildConfig,
        base_path: &Path,
    ) -> Result<Self, BuildError> {
        let catalog = DependencyCatalog::from_settings(&config.depend_types)
            .map_err(|e| BuildError::InvalidDependType {
                reason: e.to_string(),
            })?;

        Ok(Self {
            fs,
            base_path: base_path.to_path_buf(),
            app_name: config.name.clone(),
            ceiling: config.rank_ceiling(),
            catalog,
            filter: InclusionFilter::new(config.ext_classes.clone()),
            resolver: PathResolver::new(&config.name, &config.app_folder, config.paths.clone()),
            registry: ModuleRegistry::default(),
            diagnostics: Diagnostics::default(),
        })
    }

    /// Resolves the whole graph below the entry file at `entry_path`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EntryNotFound`] if the entry file cannot be
    /// read. Problems with any other file are recorded as diagnostics.
    pub fn run(mut self, entry_path: &str) -> Result<ResolvedGraph, BuildError> {
        let app_name = self.app_name.clone();
        let entry = self.load(&app_name, &logical_path(entry_path));
        if !self.registry.get(entry).exists() {
            return Err(BuildError::EntryNotFound {
                path: entry_path.to_string(),
            });
        }

        let mut worklist: Vec<WorkItem> = Vec::new();
        self.expand(entry, 0, &mut worklist);

        while let Some((identifier, rank)) = worklist.pop() {
            self.process_module(&identifier, rank, &mut worklist);
        }

        info!(modules = self.registry.len(), "dependency resolution finished");

        Ok(ResolvedGraph {
            registry: self.registry,
            diagnostics: self.diagnostics,
            resolver: self.resolver,
            entry,
        })
    }

    fn process_module(&mut self, identifier: &str, rank: u32, worklist: &mut Vec<WorkItem>) {
        let path = self.resolver.resolve(identifier);
        let id = match self.registry.lookup(&path) {
            Some(id) => id,
            None => self.load(identifier, &path),
        };

        let module = self.registry.get(id);
        if !module.exists() {
            self.diagnostics.record(Issue::MissingModule {
                identifier: identifier.to_string(),
                path,
            });
            return;
        }
        if !module.enabled() {
            return;
        }
        if module.expanded && rank <= module.rank() {
            return;
        }

        if rank >= self.ceiling {
            let module = self.registry.get_mut(id);
            module.enabled = false;
            let issue = Issue::RankCeilingExceeded {
                identifier: module.identifier().to_string(),
                path: module.logical_path().to_string(),
                limit: self.ceiling,
            };
            self.diagnostics.record(issue);
            return;
        }

        self.expand(id, rank, worklist);
    }

    /// Raises the module's rank, then queues its dependencies one level
    /// deeper, first declared on top.
    fn expand(&mut self, id: ModuleId, rank: u32, worklist: &mut Vec<WorkItem>) {
        let module = self.registry.get_mut(id);
        module.raise_rank(rank);
        module.expanded = true;
        let rank = module.rank();

        let dependencies = self.dependencies_of(id);
        self.resolver.resolve_all(dependencies.iter().map(String::as_str));

        debug!(
            module = self.registry.get(id).identifier(),
            rank,
            dependencies = dependencies.len(),
            "expanding module"
        );

        let child_rank = rank.saturating_add(1);
        worklist.extend(dependencies.into_iter().rev().map(|dep| (dep, child_rank)));
    }

    fn load(&mut self, identifier: &str, logical_path: &str) -> ModuleId {
        let disk_path = disk_path(&self.base_path, logical_path);
        let contents = match self.fs.read_to_string(&disk_path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                debug!(path = %disk_path.display(), error = %e, "source file unreadable");
                None
            }
        };
        self.registry
            .register(Module::new(identifier, logical_path, disk_path, contents))
    }

    /// Deduplicated dependencies of a module, extracted on first use.
    fn dependencies_of(&mut self, id: ModuleId) -> Vec<String> {
        let module = self.registry.get(id);
        if let Some(dependencies) = &module.dependencies {
            return dependencies.clone();
        }

        let filtered = module.filtered_contents().unwrap_or_default();
        let found = extract_dependencies(
            &self.catalog,
            &mut self.filter,
            &self.app_name,
            filtered,
        );

        let mut seen = HashSet::new();
        let unique: Vec<String> = found
            .iter()
            .filter(|dep| seen.insert(dep.as_str()))
            .cloned()
            .collect();

        let duplicates = found.len() - unique.len();
        if duplicates > 0 {
            self.diagnostics.record(Issue::DuplicateDependency {
                identifier: module.identifier().to_string(),
                path: module.logical_path().to_string(),
                count: duplicates,
            });
        }

        self.registry.get_mut(id).dependencies = Some(unique.clone());
        unique
    }
}
