//! Catalog resolution and merging
//!
//! `resolve` takes a `CatalogSource` to a `CatalogResolution`. An explicit
//! file must parse; in search mode every candidate is parsed in scan order
//! and the broken or empty ones are skipped and recorded. The result never
//! holds an empty catalog: "no mappings" is always `catalog: None`.

use std::path::{Path, PathBuf};

use log::{info, warn};

use super::{parse_file, scan::scan, CatalogRecord, CatalogSource, ResolvedCatalog};
use crate::error::{Error, Result};
use crate::path::tildotted;

/// Catalog-related command-line values
#[derive(Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Explicit catalog file; empty when not given
    pub catalog_file: String,
    /// Directory to search for catalogs; empty when not given
    pub search_dir: String,
    /// Overrides the file name searched for
    pub file_name: Option<String>,
    pub follow_symlinks: bool,
}

/// Why a catalog file found by a directory search was not merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ParseFailed(String),
    Empty,
}

/// A catalog file that was found but did not contribute mappings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCatalog {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of a successful resolution call
///
/// `catalog` is `None` when no catalog was requested, or when the catalog
/// that was found holds no mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogResolution {
    pub catalog: Option<ResolvedCatalog>,
    pub skipped: Vec<SkippedCatalog>,
}

impl CatalogResolution {
    /// Number of mappings in the resolved catalog, zero when absent
    pub fn entry_count(&self) -> usize {
        self.catalog.as_ref().map_or(0, ResolvedCatalog::len)
    }
}

/// Select a catalog source from command-line values and resolve it
///
/// Relative paths are resolved against `base`. When neither a file nor a
/// directory is given this returns an empty resolution without touching the
/// filesystem.
pub fn resolve_args(args: &CatalogArgs, base: &Path) -> Result<CatalogResolution> {
    let source = CatalogSource::from_args_in(
        &args.catalog_file,
        &args.search_dir,
        args.file_name.as_deref(),
        base,
    )?;
    match source {
        Some(source) => resolve(&source, args.follow_symlinks),
        None => Ok(CatalogResolution::default()),
    }
}

/// Resolve a catalog source into one merged catalog
pub fn resolve(source: &CatalogSource, follow_symlinks: bool) -> Result<CatalogResolution> {
    let resolution = match source {
        CatalogSource::ExplicitFile(path) => resolve_file(path)?,
        CatalogSource::SearchDirectory { root, file_name } => {
            resolve_directory(root, file_name, follow_symlinks)?
        }
    };

    if let Some(catalog) = &resolution.catalog {
        info!(
            "XML catalog: {} entries from {} file(s)",
            catalog.len(),
            catalog.sources().len()
        );
    }
    Ok(resolution)
}

fn resolve_file(path: &Path) -> Result<CatalogResolution> {
    let record = parse_file(path)?;
    if record.is_empty() {
        warn!("XML catalog has no entries: {}", tildotted(path));
        return Ok(CatalogResolution::default());
    }
    Ok(CatalogResolution {
        catalog: Some(ResolvedCatalog::from(record)),
        skipped: Vec::new(),
    })
}

fn resolve_directory(
    root: &Path,
    file_name: &str,
    follow_symlinks: bool,
) -> Result<CatalogResolution> {
    let candidates = scan(root, file_name, follow_symlinks)?;

    let mut records: Vec<CatalogRecord> = Vec::new();
    let mut skipped = Vec::new();
    for path in candidates {
        match parse_file(&path) {
            Ok(record) if record.is_empty() => {
                warn!("Skipping XML catalog with no entries: {}", tildotted(&path));
                skipped.push(SkippedCatalog {
                    path,
                    reason: SkipReason::Empty,
                });
            }
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping XML catalog {}: {}", tildotted(&path), e);
                skipped.push(SkippedCatalog {
                    path,
                    reason: SkipReason::ParseFailed(e.to_string()),
                });
            }
        }
    }

    let catalog = match records.len() {
        0 => {
            warn!(
                "No valid XML catalog entries found in {}",
                tildotted(root)
            );
            return Err(Error::NoValidCatalogEntries {
                root: root.display().to_string(),
                pattern: file_name.to_string(),
            });
        }
        1 => records.pop().map(ResolvedCatalog::from),
        _ => ResolvedCatalog::merge(records),
    };

    Ok(CatalogResolution { catalog, skipped })
}
