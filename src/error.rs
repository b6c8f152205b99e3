//! Fatal build errors.
//!
//! Per-module problems (missing dependency files, duplicates, rank ceiling
//! trips) are not errors at this level; they are collected as
//! [`crate::diagnostics::Issue`]s and the run carries on.

use std::path::PathBuf;

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    ConfigRead {
        /// Config file location.
        path: PathBuf,
        /// Underlying I/O message.
        reason: String,
    },

    /// The configuration file is not valid YAML for the expected schema.
    #[error("Failed to parse config file {path}: {reason}")]
    ConfigParse {
        /// Config file location.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A dependency keyword cannot be turned into a declaration pattern.
    #[error("Invalid dependency type: {reason}")]
    InvalidDependType {
        /// Pattern compiler message.
        reason: String,
    },

    /// The configured charset cannot be decoded.
    #[error("Unsupported charset '{charset}': only UTF-8 sources are supported")]
    UnsupportedCharset {
        /// Charset named in the configuration.
        charset: String,
    },

    /// The entry source file could not be read.
    #[error("Source file not found: {path}")]
    EntryNotFound {
        /// Logical path of the entry file.
        path: String,
    },

    /// The source backup could not be created before overwriting it.
    #[error("Failed to back up {source_path} to {backup}: {reason}")]
    BackupFailed {
        /// File being backed up.
        source_path: PathBuf,
        /// Backup destination.
        backup: PathBuf,
        /// Underlying I/O message.
        reason: String,
    },

    /// The bundle could not be written.
    #[error("Failed to write output file {path}: {reason}")]
    OutputWrite {
        /// Output file location.
        path: PathBuf,
        /// Underlying I/O message.
        reason: String,
    },
}
