//! Main entry point for the cleanpath CLI.
//!
//! Prints a cleaned copy of a delimited environment variable such as
//! `PATH`: empty and duplicate entries are removed, extra entries can be
//! merged in and entries can be checked against the filesystem.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = cleanpath::init_logger(cli.vdebug, cli.debug, cli.quiet);

    let global = GlobalOptions {
        debug: cli.debug,
        vdebug: cli.vdebug,
        quiet: cli.quiet,
        config: cli.config,
    };

    match cli.clean.execute(&global) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
