//! Namespace include/exclude rules.

use indexmap::IndexMap;

/// Hierarchical include/exclude policy over dotted identifiers.
///
/// A rule on `Ext` covers `Ext.grid.Panel` unless a more specific rule such
/// as `Ext.grid` says otherwise. Answers found on an ancestor are memoized
/// under the asked identifier; identifiers no rule covers are included and
/// leave the table untouched.
#[derive(Debug, Clone, Default)]
pub struct InclusionFilter {
    rules: IndexMap<String, bool>,
}

impl InclusionFilter {
    /// Creates a filter seeded with explicit rules.
    #[must_use]
    pub fn new(rules: IndexMap<String, bool>) -> Self {
        Self { rules }
    }

    /// Whether `identifier` should be bundled.
    pub fn should_include(&mut self, identifier: &str) -> bool {
        if let Some(&include) = self.rules.get(identifier) {
            return include;
        }

        let mut prefix = identifier;
        while let Some((parent, _)) = prefix.rsplit_once('.') {
            prefix = parent;
            if let Some(&include) = self.rules.get(prefix) {
                self.rules.insert(identifier.to_string(), include);
                return include;
            }
        }

        true
    }

    /// Current rule table, including memoized answers.
    #[must_use]
    pub fn rules(&self) -> &IndexMap<String, bool> {
        &self.rules
    }
}
