//! Source modules and the per-run module registry.

pub mod scan;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

pub use scan::{filtered_view, minified_view};

/// Index of a module in its [`ModuleRegistry`]; doubles as discovery order.
pub type ModuleId = usize;

/// One source file reached during resolution.
#[derive(Debug, Clone)]
pub struct Module {
    identifier: String,
    logical_path: String,
    disk_path: PathBuf,
    raw: Option<String>,
    filtered: Option<String>,
    /// Deepest traversal depth at which the module was reached.
    pub(crate) rank: u32,
    /// Cleared when the rank ceiling trips; disabled modules are never
    /// expanded again but are still emitted.
    pub(crate) enabled: bool,
    /// Set once the module's dependencies have been queued.
    pub(crate) expanded: bool,
    /// Dependency identifiers, extracted once.
    pub(crate) dependencies: Option<Vec<String>>,
    order: ModuleId,
}

impl Module {
    /// Builds a module from the result of reading its file. `None` marks a
    /// file that could not be read.
    #[must_use]
    pub fn new(
        identifier: &str,
        logical_path: &str,
        disk_path: PathBuf,
        contents: Option<String>,
    ) -> Self {
        let raw = contents.map(|text| normalize_newlines(&text));
        let filtered = raw.as_deref().map(filtered_view);
        Self {
            identifier: identifier.to_string(),
            logical_path: logical_path.to_string(),
            disk_path,
            raw,
            filtered,
            rank: 0,
            enabled: true,
            expanded: false,
            dependencies: None,
            order: 0,
        }
    }

    /// Identifier that first reached this module.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Logical path, the registry key.
    #[must_use]
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    /// Location the contents were read from.
    #[must_use]
    pub fn disk_path(&self) -> &std::path::Path {
        &self.disk_path
    }

    /// Newline-normalized contents; `None` when the file is missing.
    #[must_use]
    pub fn raw_contents(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Comment and literal filtered view used for dependency scanning.
    #[must_use]
    pub fn filtered_contents(&self) -> Option<&str> {
        self.filtered.as_deref()
    }

    /// Whether the file was read.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.raw.is_some()
    }

    /// Deepest depth at which the module was reached.
    #[must_use]
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Whether the module may still be expanded.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Discovery order.
    #[must_use]
    pub fn order(&self) -> ModuleId {
        self.order
    }

    /// Dependencies found in this module, once it has been expanded.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        self.dependencies.as_deref().unwrap_or_default()
    }

    /// Raises the rank to `rank` if it is deeper; never lowers it.
    pub(crate) fn raise_rank(&mut self, rank: u32) {
        self.rank = self.rank.max(rank);
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Serializable view of a module for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    /// Traversal rank.
    pub rank: u32,
    /// Identifier that first reached the module.
    pub identifier: String,
    /// Logical path.
    pub path: String,
    /// Whether expansion completed without tripping the rank ceiling.
    pub enabled: bool,
}

impl From<&Module> for ModuleSummary {
    fn from(module: &Module) -> Self {
        Self {
            rank: module.rank,
            identifier: module.identifier.clone(),
            path: module.logical_path.clone(),
            enabled: module.enabled,
        }
    }
}

/// Append-only store of modules keyed by logical path.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
    by_path: HashMap<String, ModuleId>,
}

impl ModuleRegistry {
    /// Module registered under `logical_path`, if any.
    #[must_use]
    pub fn lookup(&self, logical_path: &str) -> Option<ModuleId> {
        self.by_path.get(logical_path).copied()
    }

    /// Registers a module, or returns the existing one for the same path.
    pub fn register(&mut self, mut module: Module) -> ModuleId {
        if let Some(id) = self.lookup(&module.logical_path) {
            return id;
        }
        let id = self.modules.len();
        module.order = id;
        self.by_path.insert(module.logical_path.clone(), id);
        self.modules.push(module);
        id
    }

    /// Module by id.
    #[must_use]
    pub fn get(&self, id: ModuleId) -> &Module {
        &self.modules[id]
    }

    pub(crate) fn get_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id]
    }

    /// All modules in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Number of registered modules, missing ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(identifier: &str, path: &str, contents: Option<&str>) -> Module {
        Module::new(identifier, path, PathBuf::from(path), contents.map(str::to_string))
    }

    #[test]
    fn contents_are_newline_normalized() {
        let module = module("Demo.A", "/portal/A.js", Some("a\r\nb\rc"));
        assert_eq!(module.raw_contents(), Some("a\nb\nc"));
        assert!(module.exists());
    }

    #[test]
    fn missing_module_has_no_contents() {
        let module = module("Demo.B", "/portal/B.js", None);
        assert!(!module.exists());
        assert_eq!(module.filtered_contents(), None);
    }

    #[test]
    fn rank_never_decreases() {
        let mut module = module("Demo.A", "/portal/A.js", Some(""));
        module.raise_rank(3);
        module.raise_rank(1);
        assert_eq!(module.rank(), 3);
    }

    #[test]
    fn registry_keeps_one_module_per_path() {
        let mut registry = ModuleRegistry::default();
        let first = registry.register(module("Demo.A", "/portal/A.js", Some("first")));
        let second = registry.register(module("Portal.A", "/portal/A.js", Some("second")));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(first).identifier(), "Demo.A");
        assert_eq!(registry.get(first).raw_contents(), Some("first"));
    }

    #[test]
    fn registration_order_is_discovery_order() {
        let mut registry = ModuleRegistry::default();
        registry.register(module("Demo.A", "/portal/A.js", Some("")));
        let b = registry.register(module("Demo.B", "/portal/B.js", Some("")));
        assert_eq!(registry.get(b).order(), 1);
    }
}
