//! Utility functions for CLI operations.
//!
//! Configuration loading, environment lookup and output helpers shared by
//! the command implementation.

use crate::error::CliError;
use cleanpath::config::ConfigValidator;
use cleanpath::{Config, ConfigBuilder};
use std::env;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // Verbosity fields are consumed by init_logger in main.rs
pub struct GlobalOptions {
    /// Enable debug output.
    pub debug: bool,

    /// Enable trace output.
    pub vdebug: bool,

    /// Suppress warnings.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command-line overrides (highest priority)
/// 2. Environment variables
/// 3. Configuration file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(path) = &global.config {
        builder = builder.with_config_file(path);
    }

    builder
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Checks that `name` can be used as an environment variable name.
pub fn validate_variable_name(name: &OsStr) -> Result<(), CliError> {
    ConfigValidator::validate_variable_name("ENVNAME", name.as_encoded_bytes())
        .map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Reads an environment variable as raw bytes. A missing variable is empty.
pub fn read_variable(name: &OsStr) -> Vec<u8> {
    env::var_os(name).map(os_bytes).unwrap_or_default()
}

/// Converts an argument or environment value into its byte representation.
pub fn os_bytes(value: OsString) -> Vec<u8> {
    value.into_encoded_bytes()
}

/// Writes the cleaned list followed by a newline to stdout.
pub fn write_output(output: &[u8]) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output)?;
    handle.write_all(b"\n")?;
    handle.flush()?;
    Ok(())
}
