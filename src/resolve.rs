//! Identifier to logical path resolution.

use indexmap::IndexMap;

/// Extension appended to resolved source paths.
pub const SOURCE_EXTENSION: &str = ".js";

/// Whether `identifier` is `namespace` itself or lives below it.
///
/// Matching is segment-aware: `DemoSingleton` is not inside `Demo`.
#[must_use]
pub fn in_namespace(identifier: &str, namespace: &str) -> bool {
    identifier
        .strip_prefix(namespace)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Maps identifiers to logical paths, memoizing every answer.
///
/// Resolution order:
/// 1. a known identifier returns its recorded path;
/// 2. the nearest known ancestor namespace is extended with the remaining
///    segments (`Ext` at `/ext/src` gives `Ext.grid.Panel` at
///    `/ext/src/grid/Panel.js`);
/// 3. the naming convention roots the identifier under the application
///    folder, dropping the application namespace if present.
#[derive(Debug, Clone)]
pub struct PathResolver {
    app_name: String,
    app_folder: String,
    table: IndexMap<String, String>,
}

impl PathResolver {
    /// Creates a resolver seeded with known paths.
    #[must_use]
    pub fn new(app_name: &str, app_folder: &str, known: IndexMap<String, String>) -> Self {
        Self {
            app_name: app_name.to_string(),
            app_folder: app_folder.trim_end_matches('/').to_string(),
            table: known,
        }
    }

    /// Resolves an identifier to its logical path.
    pub fn resolve(&mut self, identifier: &str) -> String {
        if let Some(path) = self.table.get(identifier) {
            return path.clone();
        }

        let path = self.by_tree(identifier).unwrap_or_else(|| self.by_convention(identifier));
        self.table.insert(identifier.to_string(), path.clone());
        path
    }

    /// Resolves a batch of identifiers so later lookups see their paths.
    pub fn resolve_all<'a>(&mut self, identifiers: impl IntoIterator<Item = &'a str>) {
        for identifier in identifiers {
            self.resolve(identifier);
        }
    }

    /// Path already recorded for `identifier`, if any.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.table.get(identifier).map(String::as_str)
    }

    /// Identifier to path table, in insertion order.
    #[must_use]
    pub fn table(&self) -> &IndexMap<String, String> {
        &self.table
    }

    fn by_tree(&self, identifier: &str) -> Option<String> {
        let mut prefix = identifier;
        while let Some((parent, _)) = prefix.rsplit_once('.') {
            prefix = parent;
            if let Some(base) = self.table.get(prefix) {
                let subtree = identifier[prefix.len()..].replace('.', "/");
                let mut path = format!("{}{subtree}", base.trim_end_matches('/'));
                if !path.ends_with(SOURCE_EXTENSION) {
                    path.push_str(SOURCE_EXTENSION);
                }
                return Some(path);
            }
        }
        None
    }

    fn by_convention(&self, identifier: &str) -> String {
        if in_namespace(identifier, &self.app_name) {
            let rest = identifier[self.app_name.len()..].replace('.', "/");
            format!("{}{rest}{SOURCE_EXTENSION}", self.app_folder)
        } else {
            format!("{}/{}{SOURCE_EXTENSION}", self.app_folder, identifier.replace('.', "/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(known: &[(&str, &str)]) -> PathResolver {
        let known = known.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        PathResolver::new("Demo", "/portal", known)
    }

    #[test]
    fn namespace_match_is_segment_aware() {
        assert!(in_namespace("Demo", "Demo"));
        assert!(in_namespace("Demo.view.Main", "Demo"));
        assert!(!in_namespace("DemoSingleton", "Demo"));
        assert!(!in_namespace("Ext.Demo", "Demo"));
    }

    #[test]
    fn convention_strips_application_namespace() {
        let mut resolver = resolver(&[]);
        assert_eq!(resolver.resolve("Demo.view.Main"), "/portal/view/Main.js");
    }

    #[test]
    fn convention_roots_foreign_namespace_under_app_folder() {
        let mut resolver = resolver(&[]);
        assert_eq!(resolver.resolve("view.Main"), "/portal/view/Main.js");
        assert_eq!(resolver.resolve("DemoSingleton"), "/portal/DemoSingleton.js");
    }

    #[test]
    fn tree_lookup_extends_nearest_known_ancestor() {
        let mut resolver = resolver(&[("Ext", "/ext/src"), ("Ext.ux", "/portal/ux")]);

        assert_eq!(resolver.resolve("Ext.grid.Panel"), "/ext/src/grid/Panel.js");
        assert_eq!(resolver.resolve("Ext.ux.Box"), "/portal/ux/Box.js");
    }

    #[test]
    fn exact_known_path_is_returned_verbatim() {
        let mut resolver = resolver(&[("DemoSingleton", "/portal/DemoSingleton.js")]);
        assert_eq!(resolver.resolve("DemoSingleton"), "/portal/DemoSingleton.js");
    }

    #[test]
    fn resolved_paths_are_memoized_and_feed_descendants() {
        let mut resolver = resolver(&[("Demo", "/portal/app")]);

        let first = resolver.resolve("Demo.view.Main");
        let second = resolver.resolve("Demo.view.Main");
        assert_eq!(first, second);
        assert_eq!(resolver.get("Demo.view.Main"), Some("/portal/app/view/Main.js"));
    }

    #[test]
    fn bulk_resolution_lets_siblings_see_each_other() {
        let mut resolver = resolver(&[]);

        resolver.resolve_all(["Plugins", "Demo.store.Users"]);
        assert_eq!(resolver.get("Plugins"), Some("/portal/Plugins.js"));
        assert_eq!(resolver.get("Demo.store.Users"), Some("/portal/store/Users.js"));
        assert_eq!(resolver.table().len(), 2);
    }

    #[test]
    fn case_distinct_identifiers_get_distinct_paths() {
        let mut resolver = resolver(&[]);
        assert_ne!(resolver.resolve("Demo.model.User"), resolver.resolve("Demo.model.user"));
    }
}
