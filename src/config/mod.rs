//! Build configuration.
//!
//! Loaded from a YAML file through the [`FileSystem`] port. Every key is
//! optional; missing keys fall back to the defaults below. Keys use the
//! extapp spelling; the snake_case forms are accepted as aliases.
//!
//! ```yaml
//! name: Demo
//! appFolder: /portal
//! paths:
//!   Demo: /portal
//!   Ext: /ext/src
//! dependTypes:
//!   requires: true
//!   views: true
//!   extend: true
//!   widgets: { array: true, folder: true }
//! extClasses:
//!   Ext: false
//!   Ext.util: true
//! safeRank: true
//! safeRankLimit: 100
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::ports::filesystem::FileSystem;

/// Ceiling applied when `safeRank` is switched off, so cyclic graphs still
/// terminate.
pub const HARD_RANK_CEILING: u32 = 10_000;

/// Parsed build configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Application root namespace.
    pub name: String,
    /// Logical folder the application namespace maps to.
    #[serde(alias = "app_folder")]
    pub app_folder: String,
    /// Source text encoding.
    pub charset: String,
    /// Known identifier to path mappings, consulted before the naming
    /// convention.
    pub paths: IndexMap<String, String>,
    /// Dependency keywords to scan for.
    #[serde(alias = "depend_types")]
    pub depend_types: IndexMap<String, DependTypeSetting>,
    /// Namespace include (`true`) and exclude (`false`) rules.
    #[serde(alias = "ext_classes", alias = "classes")]
    pub ext_classes: IndexMap<String, bool>,
    /// Whether the configured rank ceiling is enforced.
    #[serde(alias = "safe_rank")]
    pub safe_rank: bool,
    /// Rank at which expansion stops.
    #[serde(alias = "safe_rank_limit")]
    pub safe_rank_limit: u32,
}

/// Per-keyword setting: a plain toggle for known keywords, or a full
/// declaration for custom ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependTypeSetting {
    /// Enables or disables a keyword with its default shape.
    Toggle(bool),
    /// Declares the keyword's shape explicitly.
    Custom(CustomDependType),
}

/// Explicit dependency keyword declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomDependType {
    /// Whether the keyword is scanned.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// `keyword: ['A', 'B']` rather than `keyword: 'A'`.
    #[serde(default)]
    pub array: bool,
    /// Bare identifiers live under a folder named after the keyword.
    #[serde(default)]
    pub folder: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl DependTypeSetting {
    /// Whether the keyword is scanned.
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Toggle(enabled) => enabled,
            Self::Custom(custom) => custom.enabled,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        let depend_types = [
            "requires",
            "uses",
            "controllers",
            "models",
            "stores",
            "views",
            "includes",
        ]
        .into_iter()
        .map(|keyword| (keyword.to_string(), DependTypeSetting::Toggle(true)))
        .collect();

        Self {
            name: "Demo".to_string(),
            app_folder: "/portal/app".to_string(),
            charset: "UTF-8".to_string(),
            paths: IndexMap::new(),
            depend_types,
            ext_classes: IndexMap::from([("Ext".to_string(), true)]),
            safe_rank: true,
            safe_rank_limit: 100,
        }
    }
}

impl BuildConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ConfigRead`] if the file cannot be read, or the
    /// errors of [`BuildConfig::parse`].
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, BuildError> {
        let contents = fs
            .read_to_string(path)
            .map_err(|e| BuildError::ConfigRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::parse(&contents, path)
    }

    /// Parses config text; `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ConfigParse`] for malformed YAML or unknown keys,
    /// and [`BuildError::UnsupportedCharset`] for a non UTF-8 charset.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, BuildError> {
        let config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(contents).map_err(|e| BuildError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), BuildError> {
        let charset = self.charset.to_ascii_lowercase();
        if charset != "utf-8" && charset != "utf8" {
            return Err(BuildError::UnsupportedCharset {
                charset: self.charset.clone(),
            });
        }
        Ok(())
    }

    /// Rank at which expansion stops: the configured limit, or
    /// [`HARD_RANK_CEILING`] when safe rank is off.
    #[must_use]
    pub fn rank_ceiling(&self) -> u32 {
        if self.safe_rank {
            self.safe_rank_limit
        } else {
            HARD_RANK_CEILING
        }
    }
}
