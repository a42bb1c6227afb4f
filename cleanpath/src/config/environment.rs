//! Environment variable handling for configuration overrides.
//!
//! CLEANPATH_* variables override values from the configuration file.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::filter::CheckMode;
use crate::pipeline::parse_delimiter;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use cleanpath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a multi-character delimiter, an invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        // CLEANPATH_DELIMITER
        if let Ok(value) = env::var("CLEANPATH_DELIMITER") {
            let byte = parse_delimiter(&value)?;
            config.delimiter = Some(char::from(byte));
        }

        // CLEANPATH_CHECK
        if let Ok(value) = env::var("CLEANPATH_CHECK") {
            config.check = Some(CheckMode::parse(&value).map_err(|message| Error::Validation {
                field: "CLEANPATH_CHECK".into(),
                message,
            })?);
        }

        // CLEANPATH_BEFORE
        if let Ok(value) = env::var("CLEANPATH_BEFORE") {
            config.before = Some(Self::parse_bool("CLEANPATH_BEFORE", &value)?);
        }

        // CLEANPATH_VARIABLE
        if let Ok(value) = env::var("CLEANPATH_VARIABLE") {
            config.variable = Some(value);
        }

        // CLEANPATH_SIZE_LIMIT
        if let Ok(value) = env::var("CLEANPATH_SIZE_LIMIT") {
            config.size_limit = Some(value.trim().parse().map_err(|_| Error::Validation {
                field: "CLEANPATH_SIZE_LIMIT".into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        // CLEANPATH_DISABLE_SIZE_LIMIT
        if let Ok(value) = env::var("CLEANPATH_DISABLE_SIZE_LIMIT") {
            config.disable_size_limit =
                Some(Self::parse_bool("CLEANPATH_DISABLE_SIZE_LIMIT", &value)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
