//! Error types for logsift.
//!
//! Errors are split by the boundary they cross:
//!
//! - [`LoadError`] - reading a CSV import, a snapshot, or a meta sidecar
//! - [`WriteError`] - writing a snapshot, a meta sidecar, or a CSV export
//! - [`AppError`] - top-level failures that end the process
//!
//! Input validation problems (bad regex, bad timestamp, out-of-range jump)
//! are not errors at this level. They are reported to the user as notices
//! by the state layer and leave prior state untouched.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Returned from startup and the event loop. Every variant is fatal: the
/// terminal is restored and the message printed to stderr.
#[derive(Debug, Error)]
pub enum AppError {
    /// The initial dataset could not be loaded.
    #[error("Failed to load input: {0}")]
    Load(#[from] LoadError),

    /// The config file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure to read a dataset or overlay file.
///
/// When this happens on startup the process exits. When it happens while
/// merging a meta sidecar, the loaded dataset stays intact and the error is
/// shown as a notice.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input is neither `.csv` nor `.json`.
    #[error("Unsupported file type (expected .csv or .json): {path}")]
    UnsupportedExtension {
        /// Path as given.
        path: PathBuf,
    },

    /// The file could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected a record.
    #[error("Invalid CSV in {path}: {source}")]
    Csv {
        /// File that failed.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A CSV import contained no records at all.
    #[error("CSV file {path} is empty")]
    EmptyCsv {
        /// File that was empty.
        path: PathBuf,
    },

    /// A snapshot or sidecar is not valid JSON for its schema.
    #[error("Invalid snapshot {path}: {source}")]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot written by an incompatible version. No migration is attempted.
    #[error("Snapshot version {found} not supported (want {expected})")]
    VersionMismatch {
        /// Version in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// An overlay key is not a base-10 64-bit identity.
    #[error("Invalid row identity key {key:?}")]
    InvalidKey {
        /// Offending key.
        key: String,
    },
}

/// Failure to persist a snapshot, sidecar, or export.
///
/// Always reported as a notice; the session continues.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Creating, writing, or renaming the target failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing the snapshot failed.
    #[error("Failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV writer failed.
    #[error("Failed to write CSV {path}: {source}")]
    Csv {
        /// Target file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}
