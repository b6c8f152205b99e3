//! Bundle ordering and rendering.

pub mod report;

use std::path::Path;

use crate::error::BuildError;
use crate::module::{Module, ModuleRegistry};
use crate::ports::filesystem::FileSystem;

pub use report::BuildReport;

/// How modules are written into the bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Precede each module with a `/* ----- <path> ----- */` comment.
    pub delimiter: bool,
    /// Write the minified view instead of the raw contents.
    pub minify: bool,
}

/// Modules to emit, deepest rank first, ties in discovery order.
///
/// Missing files are skipped; disabled modules are kept.
#[must_use]
pub fn linearize(registry: &ModuleRegistry) -> Vec<&Module> {
    let mut modules: Vec<&Module> = registry.iter().filter(|m| m.exists()).collect();
    modules.sort_by(|a, b| b.rank().cmp(&a.rank()).then(a.order().cmp(&b.order())));
    modules
}

/// Delimiter comment written before a module.
#[must_use]
pub fn delimiter(logical_path: &str) -> String {
    format!("\n\n/* ----- {logical_path} ----- */\n\n")
}

/// Concatenates `modules` in the given order.
#[must_use]
pub fn render(modules: &[&Module], options: OutputOptions) -> String {
    let mut bundle = String::new();
    for module in modules {
        if options.delimiter {
            bundle.push_str(&delimiter(module.logical_path()));
        }
        let contents = module.raw_contents().unwrap_or_default();
        if options.minify {
            bundle.push_str(&crate::module::minified_view(contents));
            bundle.push('\n');
        } else {
            bundle.push_str(contents);
            bundle.push_str("\n\n");
        }
    }
    bundle
}

/// Writes the rendered bundle.
///
/// # Errors
///
/// Returns [`BuildError::OutputWrite`] if the file cannot be written.
pub fn write_bundle(fs: &dyn FileSystem, path: &Path, bundle: &str) -> Result<(), BuildError> {
    fs.write(path, bundle)
        .map_err(|e| BuildError::OutputWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::module::Module;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn registry(entries: &[(&str, Option<&str>, u32)]) -> ModuleRegistry {
        let mut registry = ModuleRegistry::default();
        for (path, contents, rank) in entries {
            let mut module =
                Module::new(path, path, PathBuf::from(path), contents.map(str::to_string));
            module.raise_rank(*rank);
            registry.register(module);
        }
        registry
    }

    fn paths(modules: &[&Module]) -> Vec<String> {
        modules.iter().map(|m| m.logical_path().to_string()).collect()
    }

    #[test]
    fn deeper_modules_come_first_and_ties_keep_discovery_order() {
        let registry = registry(&[
            ("/app.js", Some("entry"), 0),
            ("/b.js", Some("b"), 1),
            ("/a.js", Some("a"), 1),
            ("/deep.js", Some("deep"), 2),
        ]);

        assert_eq!(paths(&linearize(&registry)), vec!["/deep.js", "/b.js", "/a.js", "/app.js"]);
    }

    #[test]
    fn equal_ranks_are_all_kept() {
        let registry = registry(&[
            ("/1.js", Some(""), 3),
            ("/2.js", Some(""), 3),
            ("/3.js", Some(""), 3),
        ]);
        assert_eq!(linearize(&registry).len(), 3);
    }

    #[test]
    fn missing_modules_are_not_emitted() {
        let registry = registry(&[("/app.js", Some("entry"), 0), ("/gone.js", None, 1)]);
        assert_eq!(paths(&linearize(&registry)), vec!["/app.js"]);
    }

    #[test]
    fn renders_with_delimiters() {
        let registry = registry(&[
            ("/app.js", Some("entry();"), 0),
            ("/lib.js", Some("lib();"), 1),
        ]);
        let ordered = linearize(&registry);

        let options = OutputOptions {
            delimiter: true,
            minify: false,
        };
        let bundle = render(&ordered, options);

        assert_eq!(
            bundle,
            "\n\n/* ----- /lib.js ----- */\n\nlib();\n\n\n\n/* ----- /app.js ----- */\n\nentry();\n\n"
        );
    }

    #[test]
    fn renders_minified_contents() {
        let registry = registry(&[("/app.js", Some("// entry\nrun( 1 );\n\n"), 0)]);

        let options = OutputOptions {
            delimiter: false,
            minify: true,
        };
        let bundle = render(&linearize(&registry), options);

        assert_eq!(bundle, "run( 1 );\n");
    }

    #[test]
    fn write_bundle_goes_through_the_port() {
        let fs = MemoryFileSystem::new();
        write_bundle(&fs, Path::new("/out.js"), "bundle").unwrap();
        assert_eq!(fs.get(Path::new("/out.js")).as_deref(), Some("bundle"));
    }
}
