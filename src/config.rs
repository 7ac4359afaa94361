//! # Application Configuration
//!
//! `AppConfig` is the processed form of the command line: the resolved
//! input, the output path, the database handle (when one is needed) and the
//! resolved XML catalog. It is built once per run by [`AppConfig::build`] and
//! handed to whatever needs it; there is no global configuration object.
//!
//! ## Build order
//!
//! 1.  Locate `xmllint` (informational only).
//! 2.  Select the XML catalog source. Conflicting or invalid catalog flags
//!     fail here, before standard input or the database are touched.
//! 3.  Resolve the input argument, capturing standard input for `-`.
//! 4.  Resolve the output path.
//! 5.  Prepare the database file, if any flag asks for it.
//! 6.  Resolve the selected catalog source.
//!
//! Any failure aborts the build; no partially built configuration is
//! returned.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::catalog::{resolve, CatalogArgs, CatalogResolution, CatalogSource};
use crate::database::{self, DatabaseArgs, MmmcDb};
use crate::defaults::XMLLINT;
use crate::error::Result;
use crate::input::{resolve_input, Input, StdinSource};
use crate::path::PathProps;

/// Processing toggles that are passed through to the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingFlags {
    pub pretty: bool,
    pub gtree: bool,
    pub gtokens: bool,
    pub group_generated: bool,
    pub validate: bool,
    pub debug: bool,
}

/// Raw option values as they come off the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub app_name: String,
    pub infile: String,
    /// Output path; empty when not given
    pub outfile: String,
    pub database: DatabaseArgs,
    pub catalog: CatalogArgs,
    pub flags: ProcessingFlags,
    pub rest_port: u16,
}

/// The configuration of one run
#[derive(Debug)]
pub struct AppConfig {
    pub app_name: String,
    pub input: Input,
    pub outfile: Option<PathProps>,
    pub database: Option<MmmcDb>,
    pub catalog: CatalogResolution,
    pub flags: ProcessingFlags,
    pub follow_symlinks: bool,
    pub rest_port: u16,
    pub xmllint: Option<PathBuf>,
}

impl AppConfig {
    /// Build the configuration, reading standard input from the process
    pub fn build(options: &ConfigOptions, working_dir: &Path) -> Result<Self> {
        let stdin = io::stdin();
        let is_terminal = stdin.is_terminal();
        Self::build_with_stdin(
            options,
            working_dir,
            StdinSource {
                reader: stdin.lock(),
                is_terminal,
            },
        )
    }

    /// Build the configuration with a caller-supplied standard input
    pub fn build_with_stdin<R: Read>(
        options: &ConfigOptions,
        working_dir: &Path,
        stdin: StdinSource<R>,
    ) -> Result<Self> {
        debug!(
            "CLI flags: debug:{} grpGen:{} import:{} pretty:{} gtokens:{} gtree:{} validate:{} zeroOutDB:{} restPort:{}",
            yn(options.flags.debug),
            yn(options.flags.group_generated),
            yn(options.database.import),
            yn(options.flags.pretty),
            yn(options.flags.gtokens),
            yn(options.flags.gtree),
            yn(options.flags.validate),
            yn(options.database.zero_out),
            options.rest_port
        );

        let xmllint = locate_xmllint(options.flags.validate);
        let catalog_source = CatalogSource::from_args_in(
            &options.catalog.catalog_file,
            &options.catalog.search_dir,
            options.catalog.file_name.as_deref(),
            working_dir,
        )?;
        let input = resolve_input(&options.infile, working_dir, stdin)?;
        let outfile = if options.outfile.is_empty() {
            None
        } else {
            Some(PathProps::new_in(&options.outfile, working_dir))
        };
        let database = database::prepare(&options.database, working_dir)?;
        let catalog = match &catalog_source {
            Some(source) => resolve(source, options.catalog.follow_symlinks)?,
            None => CatalogResolution::default(),
        };

        Ok(Self {
            app_name: options.app_name.clone(),
            input,
            outfile,
            database,
            catalog,
            flags: options.flags,
            follow_symlinks: options.catalog.follow_symlinks,
            rest_port: options.rest_port,
            xmllint,
        })
    }
}

/// Find `xmllint` on `PATH`. Its absence only matters when validation was
/// requested, and even then it is not fatal.
pub fn locate_xmllint(validate: bool) -> Option<PathBuf> {
    match which::which(XMLLINT) {
        Ok(path) => {
            info!("xmllint found at: {}", path.display());
            Some(path)
        }
        Err(_) => {
            if validate {
                info!("Validation is not possible: xmllint cannot be found");
            }
            None
        }
    }
}

fn yn(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "n"
    }
}
