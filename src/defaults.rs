//! Default values for xmlcfg configuration.
//!
//! This module provides centralized default values used across the library
//! and the CLI, ensuring consistency and avoiding duplication.

/// File name searched for when a catalog search directory is given without
/// a `--catalog-name` override.
pub const CATALOG_FILE_NAME: &str = "catalog.xml";

/// File name of the database inside the database directory.
pub const DB_FILE_NAME: &str = "mmmc.db";

/// Suffix appended to the database file name to form its backup.
pub const DB_BACKUP_SUFFIX: &str = ".bak";

/// File that receives standard input when the input argument is `-`.
pub const STDIN_FILE_NAME: &str = "Stdin.xml";

/// Argument that selects standard input as the input source.
pub const STDIN_ARG: &str = "-";

/// Namespace of OASIS XML catalog documents.
pub const OASIS_CATALOG_NS: &str = "urn:oasis:names:tc:entity:xmlns:xml:catalog";

/// Name of the external validator looked up on `PATH`.
pub const XMLLINT: &str = "xmllint";

/// Returns the backup file name for a database file name.
pub fn backup_file_name(db_file_name: &str) -> String {
    format!("{}{}", db_file_name, DB_BACKUP_SUFFIX)
}
