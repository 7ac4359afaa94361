//! Input argument processing
//!
//! The input is either a file, a directory (processed recursively), or `-`
//! for standard input. Standard input is captured into `Stdin.xml` in the
//! working directory so later stages can treat it as an ordinary file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::info;

use crate::defaults::{STDIN_ARG, STDIN_FILE_NAME};
use crate::error::{Error, Result};
use crate::path::PathProps;

/// The resolved input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub path: PathProps,
    /// The input is one file rather than a directory tree
    pub single_file: bool,
    pub from_stdin: bool,
}

/// Where standard input comes from, for callers and tests that replace it
pub struct StdinSource<R> {
    pub reader: R,
    pub is_terminal: bool,
}

/// Resolve the input argument against `working_dir`
pub fn resolve_input<R: Read>(
    arg: &str,
    working_dir: &Path,
    stdin: StdinSource<R>,
) -> Result<Input> {
    if arg == STDIN_ARG {
        if stdin.is_terminal {
            eprintln!("==> Reading from Stdin; press ^D right after a newline to end");
        } else {
            info!("Reading Stdin from a file or pipe");
        }
        let dest = capture_stdin(stdin.reader, &working_dir.join(STDIN_FILE_NAME))?;
        let path = PathProps::new_in(&dest.display().to_string(), working_dir);
        return Ok(Input {
            path,
            single_file: true,
            from_stdin: true,
        });
    }

    let path = PathProps::new_in(arg, working_dir);
    if path.abs_path() != Path::new(arg) {
        info!("Infilespec: {}", path.tildotted());
    }

    if path.is_okay_dir() {
        info!("The input is a directory and will be processed recursively.");
        Ok(Input {
            path,
            single_file: false,
            from_stdin: false,
        })
    } else if path.is_okay_file() {
        info!("The input is a single file.");
        Ok(Input {
            path,
            single_file: true,
            from_stdin: false,
        })
    } else {
        Err(Error::InvalidInput {
            path: path.abs_path().display().to_string(),
        })
    }
}

/// Copy everything from `reader` into `dest`, replacing any previous content
pub fn capture_stdin<R: Read>(mut reader: R, dest: &Path) -> Result<PathBuf> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    fs::write(dest, content)?;
    Ok(dest.to_path_buf())
}
