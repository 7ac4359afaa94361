//! # Error Handling
//!
//! This module defines the centralized error type for the `xmlcfg` library.
//! It uses the `thiserror` library to create an `Error` enum that covers the
//! failure modes of configuration processing, providing clear and descriptive
//! messages that name the offending paths.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant carries enough context (argument, absolute path, pattern) for the
//!   caller to print a useful diagnostic.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! The catalog variants map one-to-one onto the stages of catalog resolution:
//!
//! - Conflicting source flags (detected before any I/O).
//! - Invalid catalog file or directory (detected before any parsing).
//! - Directory scan failures, and scans that match nothing.
//! - Parse failure of an explicitly named catalog file.
//! - A directory search in which no file yielded usable entries.
//!
//! The remaining variants cover input processing, the database file
//! lifecycle, flag registry misuse and wrapped I/O errors.

use thiserror::Error;

/// Main error type for xmlcfg operations
#[derive(Error, Debug)]
pub enum Error {
    /// Both a catalog file and a catalog search directory were given.
    #[error("Conflicting catalog flags: catalog file {file:?} and search directory {dir:?} are mutually exclusive")]
    ConflictingCatalogFlags { file: String, dir: String },

    /// The explicit catalog file is missing, not a regular file, or empty.
    #[error("Invalid catalog file {arg:?} ({path}): {message}")]
    InvalidCatalogFile {
        arg: String,
        path: String,
        message: String,
    },

    /// The catalog search directory is missing or unreadable.
    #[error("Invalid catalog search directory {arg:?} ({path}): {message}")]
    InvalidCatalogDirectory {
        arg: String,
        path: String,
        message: String,
    },

    /// Walking the catalog search directory failed.
    #[error("Catalog scan failed in {root} for {pattern:?}: {message}")]
    CatalogScanFailed {
        root: String,
        pattern: String,
        message: String,
    },

    /// The catalog search directory contains no file with the wanted name.
    #[error("No catalog files named {pattern:?} found in {root}")]
    NoCatalogFilesFound { root: String, pattern: String },

    /// An explicitly named catalog file could not be parsed.
    #[error("Catalog parse error in {path}: {message}")]
    CatalogParseFailed { path: String, message: String },

    /// Every catalog found in the search directory failed to parse or was empty.
    #[error("No valid catalog entries found in {root} (searched for {pattern:?})")]
    NoValidCatalogEntries { root: String, pattern: String },

    /// The input argument names something that is neither a file nor a directory.
    #[error("Bad type for input: {path}")]
    InvalidInput { path: String },

    /// The database directory could not be used.
    #[error("Database error for {path}: {message}")]
    Database { path: String, message: String },

    /// A flag key that is not part of the flag registry.
    #[error("Unknown flag: {key}")]
    UnknownFlag { key: String },

    /// The command line did not describe any work to do.
    #[error("{message}")]
    Usage { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error reports a misuse of the command line rather than a
    /// failure while doing work.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::Usage { .. } | Error::ConflictingCatalogFlags { .. } | Error::UnknownFlag { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
