//! Recursive search for catalog files by exact file name

use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::tildotted;

/// Find every regular file named `file_name` below `root`
///
/// Directory entries are visited sorted by file name, so the result order is
/// stable across runs and is the order catalogs are merged in. Only an error
/// on `root` itself fails the scan. Entries below it that cannot be read,
/// such as dangling symlinks or symlink loops, are logged and passed over.
/// An empty result is reported as [`Error::NoCatalogFilesFound`].
pub fn scan(root: &Path, file_name: &str, follow_symlinks: bool) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(follow_symlinks)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::CatalogScanFailed {
                    root: root.display().to_string(),
                    pattern: file_name.to_string(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                match e.path() {
                    Some(path) => warn!("Skipping {} during catalog scan: {}", tildotted(path), e),
                    None => warn!("Skipping entry during catalog scan: {}", e),
                }
                continue;
            }
        };

        if entry.file_type().is_file() && entry.file_name() == file_name {
            found.push(entry.into_path());
        }
    }

    if found.is_empty() {
        return Err(Error::NoCatalogFilesFound {
            root: root.display().to_string(),
            pattern: file_name.to_string(),
        });
    }
    Ok(found)
}
