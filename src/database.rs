//! Database file lifecycle
//!
//! The database lives in a single file, `mmmc.db`, inside the database
//! directory. Before a run touches it, the current file is preserved as
//! `mmmc.db.bak`: copied when the run keeps the data, moved away when the run
//! zeroes the database out. Only the file lifecycle is handled here; the
//! content of the database belongs to the application.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use log::info;

use crate::defaults::{backup_file_name, DB_FILE_NAME};
use crate::error::{Error, Result};
use crate::path::{tildotted, PathProps};

/// What a run wants from the database
#[derive(Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database directory; empty means the working directory
    pub db_dir: String,
    pub import: bool,
    pub zero_out: bool,
}

impl DatabaseArgs {
    /// The database is only touched when a flag asks for it
    pub fn must_access(&self) -> bool {
        self.import || self.zero_out || !self.db_dir.is_empty()
    }
}

/// Handle on the database file. Creating one does not touch any files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmmcDb {
    dir: PathBuf,
    file: PathBuf,
}

impl MmmcDb {
    /// Check that `dir_arg` can hold the database
    ///
    /// The directory may not exist yet, but if it exists it must be a
    /// directory.
    pub fn new(dir_arg: &str, working_dir: &Path) -> Result<Self> {
        let dir = if dir_arg.is_empty() {
            PathProps::new_in(".", working_dir)
        } else {
            PathProps::new_in(dir_arg, working_dir)
        };
        if dir.exists() && !dir.is_okay_dir() {
            return Err(Error::Database {
                path: dir.abs_path().display().to_string(),
                message: "DB path failure: not a directory".to_string(),
            });
        }
        let dir = dir.abs_path().to_path_buf();
        let file = dir.join(DB_FILE_NAME);
        Ok(Self { dir, file })
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(backup_file_name(DB_FILE_NAME))
    }

    pub fn exists(&self) -> bool {
        self.file.is_file()
    }

    /// Move the current database to the backup path
    pub fn move_current_to_backup(&self) -> Result<()> {
        fs::rename(&self.file, self.backup_path()).map_err(|e| self.error("backup", e))
    }

    /// Copy the current database to the backup path
    pub fn dupe_current_to_backup(&self) -> Result<()> {
        fs::copy(&self.file, self.backup_path())
            .map(|_| ())
            .map_err(|e| self.error("backup", e))
    }

    /// Create an empty database file, truncating any existing one
    pub fn force_empty(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| self.error("create directory", e))?;
        fs::write(&self.file, b"").map_err(|e| self.error("zero out", e))
    }

    /// Create the database file if it does not exist, keeping existing content
    pub fn force_exist(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| self.error("create directory", e))?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .map(|_| ())
            .map_err(|e| self.error("create", e))
    }

    fn error(&self, action: &str, e: std::io::Error) -> Error {
        Error::Database {
            path: self.file.display().to_string(),
            message: format!("{} failed: {}", action, e),
        }
    }
}

/// Open the database for this run if any flag asks for it
///
/// An existing database is always backed up first. With `zero_out` the run
/// starts from an empty file; otherwise the file is created when missing.
pub fn prepare(args: &DatabaseArgs, working_dir: &Path) -> Result<Option<MmmcDb>> {
    if !args.must_access() {
        return Ok(None);
    }

    let db = MmmcDb::new(&args.db_dir, working_dir)?;
    let exists = db.exists();
    info!(
        "DB {}: {}",
        if exists { "exists" } else { "does not exist" },
        tildotted(db.path())
    );

    if args.zero_out {
        info!("Zeroing out DB");
        if exists {
            db.move_current_to_backup()?;
        }
        db.force_empty()?;
    } else {
        if exists {
            db.dupe_current_to_backup()?;
        }
        db.force_exist()?;
    }
    Ok(Some(db))
}
