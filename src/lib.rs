//! # xmlcfg Library
//!
//! This library turns the command line of an XML-processing tool into an
//! explicit configuration value. It is designed to be used by the `xmlcfg`
//! command-line tool but can also be embedded in other XML tools that share
//! the same flags.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//! use xmlcfg::catalog::{resolve_args, CatalogArgs};
//!
//! let args = CatalogArgs {
//!     search_dir: "schemas".to_string(),
//!     follow_symlinks: true,
//!     ..Default::default()
//! };
//! let resolution = resolve_args(&args, Path::new(".")).unwrap();
//! if let Some(catalog) = &resolution.catalog {
//!     println!("{} catalog entries", catalog.len());
//! }
//! for skipped in &resolution.skipped {
//!     println!("skipped {}", skipped.path.display());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Catalogs (`catalog`)**: Selects, scans, parses and merges OASIS XML
//!   catalog files into one ordered list of public-identifier mappings.
//! - **Configuration (`config`)**: Builds the `AppConfig` of one run from raw
//!   option values.
//! - **Input (`input`)**: Classifies the input argument and captures standard
//!   input.
//! - **Database (`database`)**: Backs up, zeroes out or creates the database
//!   file.
//! - **Flags (`flags`)**: The flag registry and its help visibility.
//! - **Paths (`path`)**: Classification of command-line path arguments.

pub mod catalog;
pub mod config;
pub mod database;
pub mod defaults;
pub mod error;
pub mod flags;
pub mod input;
pub mod output;
pub mod path;

#[cfg(test)]
mod catalog_proptest;
