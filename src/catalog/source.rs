//! Catalog source selection
//!
//! Turns the catalog-file and search-directory arguments into a
//! `CatalogSource`. Only path metadata is inspected here; catalog content is
//! read later by the resolver.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults::CATALOG_FILE_NAME;
use crate::error::{Error, Result};
use crate::path::PathProps;

/// Where catalog files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A single catalog file named on the command line
    ExplicitFile(PathBuf),
    /// Every file named `file_name` below `root`
    SearchDirectory { root: PathBuf, file_name: String },
}

impl CatalogSource {
    /// Select a source from the command-line arguments, resolving relative
    /// paths against `base`.
    ///
    /// Empty strings mean "not provided". Returns `Ok(None)` when neither
    /// argument is given. A conflict is reported before any path is looked up.
    pub fn from_args_in(
        file_arg: &str,
        dir_arg: &str,
        file_name: Option<&str>,
        base: &Path,
    ) -> Result<Option<Self>> {
        match (file_arg.is_empty(), dir_arg.is_empty()) {
            (false, false) => Err(Error::ConflictingCatalogFlags {
                file: file_arg.to_string(),
                dir: dir_arg.to_string(),
            }),
            (true, true) => Ok(None),
            (false, true) => explicit_file(&PathProps::new_in(file_arg, base)).map(Some),
            (true, false) => {
                search_directory(&PathProps::new_in(dir_arg, base), file_name).map(Some)
            }
        }
    }

    /// The file name searched for, or the explicit file itself
    pub fn pattern(&self) -> String {
        match self {
            CatalogSource::ExplicitFile(path) => path.display().to_string(),
            CatalogSource::SearchDirectory { file_name, .. } => file_name.clone(),
        }
    }
}

fn explicit_file(props: &PathProps) -> Result<CatalogSource> {
    let invalid = |message: &str| Error::InvalidCatalogFile {
        arg: props.arg().to_string(),
        path: props.abs_path().display().to_string(),
        message: message.to_string(),
    };

    if !props.exists() {
        return Err(invalid("file does not exist"));
    }
    if !props.is_okay_file() {
        return Err(invalid("not a regular file"));
    }
    if props.size() == 0 {
        return Err(invalid("file is empty"));
    }

    debug!("Catalog file: {}", props.tildotted());
    Ok(CatalogSource::ExplicitFile(props.abs_path().to_path_buf()))
}

fn search_directory(props: &PathProps, file_name: Option<&str>) -> Result<CatalogSource> {
    let invalid = |message: String| Error::InvalidCatalogDirectory {
        arg: props.arg().to_string(),
        path: props.abs_path().display().to_string(),
        message,
    };

    if !props.exists() {
        return Err(invalid("directory does not exist".to_string()));
    }
    if !props.is_okay_dir() {
        return Err(invalid("not a directory".to_string()));
    }
    if let Err(e) = fs::read_dir(props.abs_path()) {
        return Err(invalid(format!("directory is not readable: {}", e)));
    }

    let file_name = file_name
        .filter(|name| !name.is_empty())
        .unwrap_or(CATALOG_FILE_NAME);
    debug!(
        "Catalog search directory: {} (file name {:?})",
        props.tildotted(),
        file_name
    );
    Ok(CatalogSource::SearchDirectory {
        root: props.abs_path().to_path_buf(),
        file_name: file_name.to_string(),
    })
}
