//! Dependency declaration extraction.

use crate::catalog::{DependencyCatalog, DependencyType};
use crate::filter::InclusionFilter;
use crate::resolve::in_namespace;

/// Identifiers declared in `filtered`, scanned keyword by keyword in catalog
/// order, filtered and qualified. Duplicates are kept; the caller collapses
/// them.
pub fn extract_dependencies(
    catalog: &DependencyCatalog,
    filter: &mut InclusionFilter,
    app_name: &str,
    filtered: &str,
) -> Vec<String> {
    let mut found = Vec::new();

    for dep_type in catalog.active() {
        for declaration in dep_type.declarations(filtered) {
            let raw: Vec<&str> = if dep_type.spec().array {
                quoted_tokens(declaration).collect()
            } else {
                vec![declaration]
            };

            for identifier in raw {
                if filter.should_include(identifier) {
                    found.push(qualify(dep_type, app_name, identifier));
                }
            }
        }
    }

    found
}

/// Bodies of the single-quoted literals in a list body such as `'A','B'`.
///
/// The filtered view guarantees literals are single quoted and never contain
/// quotes, so alternating segments are literal bodies.
fn quoted_tokens(list: &str) -> impl Iterator<Item = &str> {
    list.split('\'').skip(1).step_by(2).filter(|token| !token.is_empty())
}

/// Places a bare identifier of a folder-qualified type under
/// `<app>.<folder>`; anything already in the application namespace, and any
/// identifier of a flat type, is returned unchanged.
#[must_use]
pub fn qualify(dep_type: &DependencyType, app_name: &str, identifier: &str) -> String {
    if dep_type.spec().folder && !in_namespace(identifier, app_name) {
        format!("{app_name}.{}.{identifier}", dep_type.folder_name())
    } else {
        identifier.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DependTypeSetting;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn catalog(keywords: &[&str]) -> DependencyCatalog {
        let settings: IndexMap<String, DependTypeSetting> = keywords
            .iter()
            .map(|k| ((*k).to_string(), DependTypeSetting::Toggle(true)))
            .collect();
        DependencyCatalog::from_settings(&settings).unwrap()
    }

    #[test]
    fn quoted_tokens_skip_separators_and_empty_literals() {
        let tokens: Vec<&str> = quoted_tokens("'A','',x,'B.C'").collect();
        assert_eq!(tokens, vec!["A", "B.C"]);
    }

    #[test]
    fn extracts_in_catalog_order() {
        let catalog = catalog(&["extend", "requires", "views"]);
        let mut filter = InclusionFilter::default();
        let filtered = "Ext.define('Demo.Main',{views:['Main','Demo.view.Other'],requires:['Demo.Util'],extend:'Demo.base.Widget'});";

        let found = extract_dependencies(&catalog, &mut filter, "Demo", filtered);

        assert_eq!(
            found,
            vec!["Demo.base.Widget", "Demo.Util", "Demo.view.Main", "Demo.view.Other"]
        );
    }

    #[test]
    fn excluded_identifiers_are_dropped_before_qualification() {
        let catalog = catalog(&["requires", "extend"]);
        let mut filter = InclusionFilter::new(IndexMap::from([
            ("Ext".to_string(), false),
            ("Ext.ux".to_string(), true),
        ]));
        let filtered = "{extend:'Ext.panel.Panel',requires:['Ext.ux.Box','Ext.util.Format','Demo.A']}";

        let found = extract_dependencies(&catalog, &mut filter, "Demo", filtered);

        assert_eq!(found, vec!["Ext.ux.Box", "Demo.A"]);
    }

    #[test]
    fn flat_string_type_is_not_qualified() {
        let catalog = catalog(&["extend", "controllers"]);
        let mut filter = InclusionFilter::default();

        let found = extract_dependencies(
            &catalog,
            &mut filter,
            "App",
            "{extend:'App.base.Widget',controllers:['Main']}",
        );

        assert_eq!(found, vec!["App.base.Widget", "App.controller.Main"]);
    }

    #[test]
    fn repeated_declarations_are_all_reported() {
        let catalog = catalog(&["requires"]);
        let mut filter = InclusionFilter::default();

        let found =
            extract_dependencies(&catalog, &mut filter, "A", "{requires:['A.B','A.B']}");

        assert_eq!(found, vec!["A.B", "A.B"]);
    }
}
