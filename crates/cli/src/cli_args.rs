//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and provides
//! validation for CLI arguments using the `clap` crate.

use crate::mode::{determine, Mode, Provider};
use clap::Parser;
use mediatools_core::config;
use mediatools_core::error::Result;

/// Command-line arguments for the `mt` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use mediatools_cli::cli_args::Args;
///
/// let args = Args::parse_from(["mt", "select", "-p", "*.mkv"]);
/// assert_eq!(args.command, vec!["select", "-p", "*.mkv"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to a YAML script to run.
    ///
    /// The script is a mapping with an optional `name` and a `run` list of
    /// command lines, executed in order.
    #[arg(long, short = 's')]
    pub script: Option<String>,

    /// Print the script back in its canonical form instead of running it.
    #[arg(long, short = 'p', action)]
    pub print: bool,

    /// Editor used by the `edit` action.
    ///
    /// If not provided, defaults to `$EDITOR`, then `$VISUAL`, then `vi`.
    #[arg(long, short = 'e')]
    pub editor: Option<String>,

    /// Directory the `select` action lists files from.
    #[arg(long, short = 'C', default_value = ".")]
    pub directory: String,

    /// Perform a dry run: file moves and external programs are printed, not run.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// A single command to run, e.g. `mt select -p "*.mkv"`.
    ///
    /// Without a command or a script, commands are read from stdin.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Args {
    /// The selection directory with `~` expanded.
    #[must_use]
    pub fn get_directory(&self) -> String {
        config::expand_path(&self.directory)
    }
}

impl Provider for Args {
    /// Determines the run mode from the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if a script and a command are both provided, or if
    /// `--print` is given without a script.
    fn get_mode(&self) -> Result<Mode> {
        determine(
            config::get_script_path(&self.script),
            self.print,
            &self.command,
        )
    }
}
