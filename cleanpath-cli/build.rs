//! Build script for cleanpath-cli.
//!
//! Generates the `cleanpath.1` man page into OUT_DIR with clap_mangen.
//! The command is described here again because a build script cannot
//! depend on the crate it builds.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs and src/commands/clean.rs.
fn build_cli() -> Command {
    Command::new("cleanpath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Remove duplicates from a delimited list such as PATH")
        .long_about(
            "Reads an environment variable (PATH by default), adds any extra entries, \
             removes empty and duplicate entries (the first one wins) and optionally \
             drops entries that do not exist on disk. The cleaned list is printed on \
             standard output.",
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Print every evaluated and removed entry")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress warnings")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from FILE instead of ~/.cleanpath.yaml")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("exists")
                .short('e')
                .long("exists")
                .help("Drop entries that do not exist")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("checkfiles")
                .short('f')
                .long("checkfiles")
                .help("Drop entries that are not regular files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("checkpaths")
                .short('P')
                .long("checkpaths")
                .help("Drop entries that are not directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("before")
                .short('b')
                .long("before")
                .help("Put the extra entries before the existing ones")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("delimiter")
                .short('F')
                .long("delimiter")
                .help("Use C as the delimiter instead of ':'")
                .value_name("C"),
        )
        .arg(
            Arg::new("noenv")
                .short('X')
                .long("noenv")
                .help("Do not read a variable; every argument is an entry")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("nosizelimit")
                .short('S')
                .long("nosizelimit")
                .help("Do not truncate long output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("words")
                .help("Variable to read (ENVNAME) followed by entries to add")
                .value_name("ENVNAME_OR_ENTRY")
                .num_args(0..),
        )
        .arg(
            Arg::new("extra")
                .help("Entries to add, taken verbatim")
                .value_name("ENTRY")
                .num_args(0..)
                .last(true),
        )
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or(std::io::ErrorKind::NotFound)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("cleanpath.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/clean.rs");

    Ok(())
}
