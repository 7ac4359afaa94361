//! # XML Catalog Resolution
//!
//! This module locates, parses and merges XML catalog files. A catalog maps
//! public identifiers (for example DTD identifiers) to the locations of the
//! schema files that implement them.
//!
//! ## Process
//!
//! 1.  **Source selection (`source`)**: Two mutually exclusive inputs, an
//!     explicit catalog file or a directory to search, are validated and
//!     turned into a `CatalogSource`. No file content is read at this stage.
//!
//! 2.  **Scanning (`scan`)**: In search mode the directory tree is walked for
//!     files with an exact name (`catalog.xml` unless overridden).
//!
//! 3.  **Parsing (`parse`)**: Each candidate is parsed into a `CatalogRecord`
//!     holding its `public` entries in document order.
//!
//! 4.  **Merging (`resolve`)**: Records are combined into one
//!     `ResolvedCatalog`. In search mode a broken or empty file is skipped and
//!     reported rather than failing the whole run.
//!
//! Resolution is a pure function of its inputs and the filesystem; nothing
//! is cached between calls.

pub mod parse;
pub mod resolve;
pub mod scan;
pub mod source;

use std::path::{Path, PathBuf};

pub use parse::{normalize_public_id, parse_file, parse_str};
pub use resolve::{resolve, resolve_args, CatalogArgs, CatalogResolution, SkipReason, SkippedCatalog};
pub use source::CatalogSource;

/// One `public` catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMapping {
    /// Normalized public identifier
    pub public_id: String,
    /// The `uri` attribute as written in the catalog
    pub uri: String,
    /// `uri` resolved against the directory of the catalog file
    pub location: String,
}

/// The parsed content of one catalog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub path: PathBuf,
    /// The catalog's `prefer` attribute, if present
    pub prefer: Option<String>,
    pub mappings: Vec<IdentifierMapping>,
}

impl CatalogRecord {
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// A record without mappings carries no information and is discarded
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// The merged result of catalog resolution
///
/// Mappings keep the order of their source files, and document order within
/// each file. Duplicate public identifiers are kept; lookups return the
/// first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCatalog {
    sources: Vec<PathBuf>,
    mappings: Vec<IdentifierMapping>,
}

impl ResolvedCatalog {
    /// Concatenate records in order. Returns `None` when the records hold no
    /// mappings at all.
    pub fn merge(records: Vec<CatalogRecord>) -> Option<Self> {
        let mut sources = Vec::with_capacity(records.len());
        let mut mappings = Vec::new();
        for record in records {
            sources.push(record.path);
            mappings.extend(record.mappings);
        }
        if mappings.is_empty() {
            return None;
        }
        Some(Self { sources, mappings })
    }

    /// Catalog files that contributed mappings, in merge order
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn mappings(&self) -> &[IdentifierMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Find the first mapping for a public identifier. The argument is
    /// normalized the same way catalog entries are.
    pub fn lookup_public(&self, public_id: &str) -> Option<&IdentifierMapping> {
        let wanted = normalize_public_id(public_id);
        self.mappings.iter().find(|m| m.public_id == wanted)
    }

    /// Whether `path` contributed to this catalog
    pub fn contains_source(&self, path: &Path) -> bool {
        self.sources.iter().any(|s| s == path)
    }
}

impl From<CatalogRecord> for ResolvedCatalog {
    fn from(record: CatalogRecord) -> Self {
        Self {
            sources: vec![record.path],
            mappings: record.mappings,
        }
    }
}
