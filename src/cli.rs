//! CLI argument parsing and dispatch

use std::ffi::OsString;
use std::path::Path;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};

use xmlcfg::catalog::CatalogArgs;
use xmlcfg::config::{ConfigOptions, ProcessingFlags};
use xmlcfg::database::DatabaseArgs;
use xmlcfg::error::Error;
use xmlcfg::flags::FlagVisibility;

use crate::commands;
use crate::commands::completions::CompletionShell;

const USAGE_NOTES: &str = "\
Process mixed content XML, XHTML/XDITA, and Markdown/MDITA input.
INFILE is a single file or directory name; no wildcards (?,*).
       If a directory, it is processed recursively.
INFILE may be \"-\" for Stdin: input typed (or pasted) interactively
       is written to file ./Stdin.xml for processing.";

/// xmlcfg - Configure XML processing and resolve XML catalogs
#[derive(Parser, Debug)]
#[command(name = "xmlcfg")]
#[command(version, about, long_about = None, after_help = USAGE_NOTES)]
pub struct Cli {
    /// Input file or directory, or "-" for standard input
    #[arg(value_name = "INFILE")]
    infile: Option<String>,

    /// Database mmmc.db directory path
    #[arg(short = 'd', long = "db-dir", value_name = "DIR", env = "XMLCFG_DB_DIR")]
    db_dir: Option<String>,

    /// Output file path (possibly ignored, depending on command)
    #[arg(short = 'o', long = "outfile", value_name = "PATH")]
    outfile: Option<String>,

    /// XML catalog file path (do not use with "-s")
    #[arg(short = 'c', long = "catalog", value_name = "FILE", env = "XMLCFG_CATALOG")]
    catalog: Option<String>,

    /// Directory searched recursively for XML catalog files (do not use with "-c")
    #[arg(short = 's', long = "search", value_name = "DIR", env = "XMLCFG_SEARCH")]
    search: Option<String>,

    /// File name to search for with "-s" (exact match, default catalog.xml)
    #[arg(long = "catalog-name", value_name = "NAME")]
    catalog_name: Option<String>,

    /// gTree written to file with "gtr-" prepended to file extension
    #[arg(short = 't', long = "gtree")]
    gtree: bool,

    /// Turn on debugging
    #[arg(short = 'D', long = "debug")]
    debug: bool,

    /// Pretty-print to file with "fmtd-" prepended to file extension
    #[arg(short = 'p', long = "pretty")]
    pretty: bool,

    /// gTokens written to file with "gtk-" prepended to file extension
    #[arg(short = 'k', long = "gtokens")]
    gtokens: bool,

    /// Validate input file(s) using xmllint (with "-c" or "-s")
    #[arg(short = 'v', long = "validate")]
    validate: bool,

    /// Import input file(s) to database
    #[arg(short = 'm', long = "import")]
    import: bool,

    /// Zero out the database
    #[arg(short = 'z', long = "zero-out")]
    zero_out: bool,

    /// Follow symbolic links in directory recursion
    #[arg(
        short = 'L',
        long = "symlinks",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    follow_symlinks: bool,

    /// Group all generated files in same-named folder
    #[arg(short = 'g', long = "group-gen")]
    group_gen: bool,

    /// Run REST server on port number
    #[arg(short = 'r', long = "rest-port", value_name = "PORT", default_value_t = 0)]
    rest_port: u16,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<CompletionShell>,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

/// Flags hidden from help output in this build
pub fn default_visibility() -> xmlcfg::error::Result<FlagVisibility> {
    let mut visibility = FlagVisibility::default();
    // No REST server ships with this binary
    visibility.disable(["rest-port"])?;
    Ok(visibility)
}

/// The clap command with hidden flags applied
pub fn command(visibility: &FlagVisibility) -> clap::Command {
    visibility
        .hidden_ids()
        .into_iter()
        .fold(Cli::command(), |cmd, id| cmd.mut_arg(id, |arg| arg.hide(true)))
}

impl Cli {
    /// Parse `args`, exiting with clap's usage message on malformed input
    pub fn parse_with_visibility(args: &[OsString], visibility: &FlagVisibility) -> Self {
        let matches = command(visibility).get_matches_from(args);
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Set up logging from `--log-level`; `--debug` raises it to debug.
    /// `RUST_LOG` takes precedence when set.
    pub fn init_logging(&self) {
        let level = if self.debug {
            "debug"
        } else {
            self.log_level.as_str()
        };
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp(None)
            .try_init();
    }

    /// Execute the CLI
    ///
    /// `arg_count` is the number of raw process arguments, used to tell an
    /// empty invocation from one that only lacks the input argument.
    pub fn execute(self, app_name: &str, arg_count: usize, visibility: &FlagVisibility) -> Result<()> {
        if let Some(shell) = self.completions {
            return commands::completions::execute(shell, &mut command(visibility));
        }

        let Some(infile) = self.infile.clone() else {
            let message = if arg_count < 2 {
                "Nothing to do"
            } else {
                "Argument parsing failed. Did not specify input file(s)?"
            };
            command(visibility).print_help()?;
            return Err(Error::Usage {
                message: message.to_string(),
            }
            .into());
        };

        let options = self.options(app_name, infile);
        let working_dir = std::env::current_dir()?;
        commands::run::execute(&options, &working_dir, &self.color)
    }

    fn options(&self, app_name: &str, infile: String) -> ConfigOptions {
        ConfigOptions {
            app_name: app_name.to_string(),
            infile,
            outfile: self.outfile.clone().unwrap_or_default(),
            database: DatabaseArgs {
                db_dir: self.db_dir.clone().unwrap_or_default(),
                import: self.import,
                zero_out: self.zero_out,
            },
            catalog: CatalogArgs {
                catalog_file: self.catalog.clone().unwrap_or_default(),
                search_dir: self.search.clone().unwrap_or_default(),
                file_name: self.catalog_name.clone(),
                follow_symlinks: self.follow_symlinks,
            },
            flags: ProcessingFlags {
                pretty: self.pretty,
                gtree: self.gtree,
                gtokens: self.gtokens,
                group_generated: self.group_gen,
                validate: self.validate,
                debug: self.debug,
            },
            rest_port: self.rest_port,
        }
    }
}

/// The name the binary was invoked as
pub fn app_name(args: &[OsString]) -> String {
    args.first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "xmlcfg".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlcfg::flags::FLAGS;

    fn parse(args: &[&str]) -> Cli {
        let args: Vec<OsString> = args.iter().map(OsString::from).collect();
        Cli::parse_with_visibility(&args, &FlagVisibility::default())
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_registered_flag_exists() {
        let mut visibility = FlagVisibility::default();
        visibility.disable_all();
        let cmd = command(&visibility);
        for flag in FLAGS {
            let arg = cmd
                .get_arguments()
                .find(|a| a.get_id() == flag.id)
                .unwrap_or_else(|| panic!("missing arg {}", flag.id));
            assert!(arg.is_hide_set(), "{} should be hidden", flag.key);
            assert_eq!(arg.get_long(), Some(flag.key));
            assert_eq!(arg.get_short(), flag.short);
        }
    }

    #[test]
    fn test_default_visibility_hides_rest_port() {
        let cmd = command(&default_visibility().unwrap());
        let hidden: Vec<_> = cmd
            .get_arguments()
            .filter(|a| a.is_hide_set())
            .map(|a| a.get_id().to_string())
            .collect();
        assert_eq!(hidden, vec!["rest_port"]);
    }

    #[test]
    fn test_parse_catalog_flags() {
        let cli = parse(&["xmlcfg", "-s", "schemas", "--catalog-name", "dita.xml", "doc.xml"]);
        let options = cli.options("xmlcfg", "doc.xml".to_string());
        assert_eq!(options.catalog.search_dir, "schemas");
        assert_eq!(options.catalog.catalog_file, "");
        assert_eq!(options.catalog.file_name.as_deref(), Some("dita.xml"));
        assert!(options.catalog.follow_symlinks);
    }

    #[test]
    fn test_parse_symlinks_flag_values() {
        assert!(!parse(&["xmlcfg", "--symlinks=false", "x"]).follow_symlinks);
        assert!(parse(&["xmlcfg", "x", "-L"]).follow_symlinks);
        assert!(parse(&["xmlcfg", "x"]).follow_symlinks);
    }

    #[test]
    fn test_parse_boolean_shorthands() {
        let cli = parse(&["xmlcfg", "-mzpvDgtk", "x"]);
        let options = cli.options("xmlcfg", "x".to_string());
        assert!(options.database.import);
        assert!(options.database.zero_out);
        assert!(options.flags.pretty);
        assert!(options.flags.validate);
        assert!(options.flags.debug);
        assert!(options.flags.group_generated);
        assert!(options.flags.gtree);
        assert!(options.flags.gtokens);
    }

    #[test]
    fn test_app_name() {
        let args = vec![OsString::from("/usr/local/bin/mytool")];
        assert_eq!(app_name(&args), "mytool");
        assert_eq!(app_name(&[]), "xmlcfg");
    }
}
