//! CLI structure and argument definitions.
//!
//! `cleanpath` has no subcommands: the global flags and the clean command's
//! arguments live side by side on one command line.

use crate::commands::CleanCommand;
use clap::Parser;
use std::path::PathBuf;

/// Remove duplicate and invalid entries from a delimited list such as PATH.
#[derive(Parser)]
#[command(name = "cleanpath")]
#[command(
    version,
    about = "Remove duplicates from a delimited list such as PATH",
    long_about = "Reads an environment variable (PATH by default), adds any extra \
                  entries, removes empty and duplicate entries (the first one wins) \
                  and optionally drops entries that do not exist on disk. The \
                  cleaned list is printed on standard output."
)]
pub struct Cli {
    /// Print every evaluated and removed entry
    #[arg(long)]
    pub debug: bool,

    /// Print even more diagnostics than --debug
    #[arg(long, hide = true)]
    pub vdebug: bool,

    /// Suppress warnings
    #[arg(long)]
    pub quiet: bool,

    /// Read configuration from FILE instead of ~/.cleanpath.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub clean: CleanCommand,
}
