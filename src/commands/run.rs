//! Run command implementation
//!
//! Builds the `AppConfig` for this invocation and prints what was resolved:
//! the input, the output path, the database file and the XML catalog,
//! including any catalog files that were skipped.

use anyhow::Result;
use std::path::Path;

use xmlcfg::catalog::SkipReason;
use xmlcfg::config::{AppConfig, ConfigOptions};
use xmlcfg::output::{line, Marker, OutputConfig};
use xmlcfg::path::tildotted;

/// Execute a run
pub fn execute(options: &ConfigOptions, working_dir: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    match AppConfig::build(options, working_dir) {
        Ok(config) => {
            for text in summary(&config, &out) {
                println!("{}", text);
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", line(&out, Marker::Err, "Configuration failed"));
            Err(e.into())
        }
    }
}

/// The summary lines for a built configuration
pub fn summary(config: &AppConfig, out: &OutputConfig) -> Vec<String> {
    let mut lines = Vec::new();

    let kind = if config.input.from_stdin {
        "standard input"
    } else if config.input.single_file {
        "single file"
    } else {
        "directory, recursive"
    };
    lines.push(line(
        out,
        Marker::Info,
        format!("Input: {} ({})", config.input.path.tildotted(), kind),
    ));

    if let Some(outfile) = &config.outfile {
        lines.push(line(
            out,
            Marker::Info,
            format!("Output: {}", outfile.tildotted()),
        ));
    }

    if let Some(db) = &config.database {
        lines.push(line(
            out,
            Marker::Info,
            format!("Database: {}", tildotted(db.path())),
        ));
    }

    match &config.catalog.catalog {
        Some(catalog) => lines.push(line(
            out,
            Marker::Ok,
            format!(
                "XML catalog: {} entries from {} file(s)",
                catalog.len(),
                catalog.sources().len()
            ),
        )),
        None => lines.push(line(out, Marker::Info, "XML catalog: none")),
    }

    for skipped in &config.catalog.skipped {
        let reason = match &skipped.reason {
            SkipReason::Empty => "no entries".to_string(),
            SkipReason::ParseFailed(message) => message.clone(),
        };
        lines.push(line(
            out,
            Marker::Warn,
            format!("Skipped catalog {}: {}", tildotted(&skipped.path), reason),
        ));
    }

    if config.flags.validate && config.xmllint.is_none() {
        lines.push(line(
            out,
            Marker::Warn,
            "Validation requested but xmllint was not found",
        ));
    }

    lines
}
