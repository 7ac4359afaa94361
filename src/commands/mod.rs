//! # CLI Command Implementations
//!
//! - `run`: builds the configuration of one run and prints its summary.
//! - `completions`: prints a shell completion script.
//!
//! Each module exposes an `execute` function that is called from `cli.rs`
//! and delegates the real work to the `xmlcfg` library.

pub mod completions;
pub mod run;
