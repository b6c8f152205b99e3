//! Dependency keyword catalog.
//!
//! Maps each declaration keyword to the shape of its value and to the way
//! bare identifiers declared under it are qualified:
//!
//! | keyword | value | qualification |
//! |---|---|---|
//! | `requires`, `uses`, `mixins`, `includes` | `['A', 'B']` | as written |
//! | `controllers`, `models`, `stores`, `views` | `['A', 'B']` | `<app>.<keyword singular>.A` |
//! | `extend`, `store`, `model` | `'A'` | as written |

use indexmap::IndexMap;
use regex::Regex;

use crate::config::DependTypeSetting;

/// Shape and qualification rule of one dependency keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyTypeSpec {
    /// `keyword: [...]` list rather than a single `keyword: '...'` value.
    pub array: bool,
    /// Bare identifiers are placed under a folder named after the keyword.
    pub folder: bool,
}

impl DependencyTypeSpec {
    /// `keyword: ['A', 'B']`, identifiers taken as written.
    pub const LIST: Self = Self {
        array: true,
        folder: false,
    };

    /// `keyword: ['A', 'B']`, bare identifiers placed under the keyword's folder.
    pub const FOLDER_LIST: Self = Self {
        array: true,
        folder: true,
    };

    /// `keyword: 'A'`, taken as written.
    pub const SINGLE: Self = Self {
        array: false,
        folder: false,
    };
}

const BUILTIN_TYPES: &[(&str, DependencyTypeSpec)] = &[
    ("requires", DependencyTypeSpec::LIST),
    ("uses", DependencyTypeSpec::LIST),
    ("mixins", DependencyTypeSpec::LIST),
    ("includes", DependencyTypeSpec::LIST),
    ("controllers", DependencyTypeSpec::FOLDER_LIST),
    ("models", DependencyTypeSpec::FOLDER_LIST),
    ("stores", DependencyTypeSpec::FOLDER_LIST),
    ("views", DependencyTypeSpec::FOLDER_LIST),
    ("extend", DependencyTypeSpec::SINGLE),
    ("store", DependencyTypeSpec::SINGLE),
    ("model", DependencyTypeSpec::SINGLE),
];

/// Spec of a built-in keyword.
#[must_use]
pub fn builtin_spec(keyword: &str) -> Option<DependencyTypeSpec> {
    BUILTIN_TYPES
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, spec)| *spec)
}

/// One catalog entry with its compiled declaration pattern.
#[derive(Debug, Clone)]
pub struct DependencyType {
    keyword: String,
    spec: DependencyTypeSpec,
    enabled: bool,
    pattern: Regex,
}

impl DependencyType {
    fn new(keyword: &str, spec: DependencyTypeSpec, enabled: bool) -> Result<Self, regex::Error> {
        // Patterns run over the filtered view: no whitespace, single quotes only.
        let keyword_pattern = regex::escape(keyword);
        let pattern = if spec.array {
            Regex::new(&format!(r"(?:^|[^\w$]){keyword_pattern}:\[(.*?)\]"))?
        } else {
            Regex::new(&format!(r"(?:^|[^\w$]){keyword_pattern}:'([^']+)'"))?
        };
        Ok(Self {
            keyword: keyword.to_string(),
            spec,
            enabled,
            pattern,
        })
    }

    /// Declaration keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Shape and qualification rule.
    #[must_use]
    pub fn spec(&self) -> DependencyTypeSpec {
        self.spec
    }

    /// Namespace segment used for folder-qualified identifiers:
    /// `controllers` becomes `controller`.
    #[must_use]
    pub fn folder_name(&self) -> &str {
        self.keyword.strip_suffix('s').unwrap_or(&self.keyword)
    }

    /// Captured declaration bodies in `filtered`: the list body for array
    /// types, the single identifier for string types.
    pub fn declarations<'a, 't: 'a>(
        &'a self,
        filtered: &'t str,
    ) -> impl Iterator<Item = &'t str> + 'a {
        self.pattern
            .captures_iter(filtered)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    }
}

/// The keyword table for one run.
#[derive(Debug, Clone)]
pub struct DependencyCatalog {
    types: IndexMap<String, DependencyType>,
}

impl DependencyCatalog {
    /// Builds the catalog from the configured keyword settings.
    ///
    /// Built-in keywords are present but inactive unless switched on. A
    /// configured keyword that is not built in and given as a plain toggle is
    /// treated as a single-valued, flat type. Active keywords are scanned in
    /// configuration order.
    ///
    /// # Errors
    ///
    /// Returns an error if a keyword's declaration pattern fails to compile.
    pub fn from_settings(
        settings: &IndexMap<String, DependTypeSetting>,
    ) -> Result<Self, regex::Error> {
        let mut types = IndexMap::new();

        for (keyword, setting) in settings {
            let spec = match setting {
                DependTypeSetting::Toggle(_) => {
                    builtin_spec(keyword).unwrap_or(DependencyTypeSpec::SINGLE)
                }
                DependTypeSetting::Custom(custom) => DependencyTypeSpec {
                    array: custom.array,
                    folder: custom.folder,
                },
            };
            let dep_type = DependencyType::new(keyword, spec, setting.enabled())?;
            types.insert(keyword.clone(), dep_type);
        }

        for (keyword, spec) in BUILTIN_TYPES {
            if !types.contains_key(*keyword) {
                let dep_type = DependencyType::new(keyword, *spec, false)?;
                types.insert((*keyword).to_string(), dep_type);
            }
        }

        Ok(Self { types })
    }

    /// Shape of a known keyword, active or not.
    #[must_use]
    pub fn spec_for(&self, keyword: &str) -> Option<DependencyTypeSpec> {
        self.types.get(keyword).map(DependencyType::spec)
    }

    /// Active keywords in scan order.
    pub fn active(&self) -> impl Iterator<Item = &DependencyType> {
        self.types.values().filter(|t| t.enabled)
    }
}
