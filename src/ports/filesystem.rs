//! Filesystem port: source reads, backups and the bundle write.

use std::path::Path;

/// Whole-file access to the source tree.
///
/// The resolution engine only ever reads complete files and the output stage
/// only ever replaces complete files, so nothing finer grained is exposed.
pub trait FileSystem: Send + Sync {
    /// Reads a source file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8. The
    /// engine records the module as missing in that case.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates or replaces a file with `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
