//! Configuration schema definitions.
//!
//! Every field is optional so that partial configurations from different
//! sources can be layered on top of each other.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::CheckMode;
use crate::pipeline::{CleanOptions, Order, DEFAULT_SIZE_LIMIT};

/// Environment variable read when none is named.
pub const DEFAULT_VARIABLE: &str = "PATH";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use cleanpath::config::Config;
/// use cleanpath::CheckMode;
///
/// let config: Config = serde_yaml::from_str("delimiter: ';'\ncheck: dir\n").unwrap();
/// assert_eq!(config.delimiter, Some(';'));
/// assert_eq!(config.check, Some(CheckMode::Dir));
/// assert_eq!(config.variable, None);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Token separator.
    pub delimiter: Option<char>,

    /// Filesystem check applied to every token.
    pub check: Option<CheckMode>,

    /// Put additions before the existing list instead of after it.
    pub before: Option<bool>,

    /// Name of the environment variable to clean.
    pub variable: Option<String>,

    /// Maximum output size in bytes, including room for `NAME=`.
    pub size_limit: Option<usize>,

    /// Never truncate the output.
    pub disable_size_limit: Option<bool>,
}

impl Config {
    /// The built-in defaults, with every field set.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            delimiter: Some(':'),
            check: Some(CheckMode::None),
            before: Some(false),
            variable: Some(DEFAULT_VARIABLE.to_string()),
            size_limit: Some(DEFAULT_SIZE_LIMIT),
            disable_size_limit: Some(false),
        }
    }

    /// The environment variable to read, falling back to `PATH`.
    #[must_use]
    pub fn variable_name(&self) -> &str {
        self.variable.as_deref().unwrap_or(DEFAULT_VARIABLE)
    }

    /// Turns the configuration into concrete pipeline settings.
    ///
    /// Unset fields take their built-in default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`] if the delimiter is not a single
    /// ASCII byte other than NUL.
    ///
    /// # Examples
    ///
    /// ```
    /// use cleanpath::config::Config;
    /// use cleanpath::Order;
    ///
    /// let config = Config {
    ///     before: Some(true),
    ///     disable_size_limit: Some(true),
    ///     ..Config::default()
    /// };
    /// let options = config.resolve().unwrap();
    /// assert_eq!(options.delimiter, b':');
    /// assert_eq!(options.order, Order::Prepend);
    /// assert_eq!(options.size_limit, None);
    /// ```
    pub fn resolve(&self) -> Result<CleanOptions> {
        let delimiter = match self.delimiter {
            Some(c) => delimiter_byte(c)?,
            None => crate::pipeline::DEFAULT_DELIMITER,
        };

        let size_limit = if self.disable_size_limit.unwrap_or(false) {
            None
        } else {
            Some(self.size_limit.unwrap_or(DEFAULT_SIZE_LIMIT))
        };

        Ok(CleanOptions {
            delimiter,
            order: Order::from_before(self.before.unwrap_or(false)),
            check: self.check.unwrap_or_default(),
            size_limit,
        })
    }
}

/// Converts a configured delimiter character to its byte.
pub(crate) fn delimiter_byte(c: char) -> Result<u8> {
    match u8::try_from(c) {
        Ok(byte) if byte.is_ascii() && byte != 0 => Ok(byte),
        _ => Err(Error::InvalidDelimiter {
            value: c.to_string(),
            reason: "must be a single ASCII character other than NUL".to_string(),
        }),
    }
}
