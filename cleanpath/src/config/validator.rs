//! Configuration validation.

use crate::config::schema::{delimiter_byte, Config};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use cleanpath::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
///
/// let bad = Config { size_limit: Some(0), ..Config::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(c) = config.delimiter {
            delimiter_byte(c)?;
        }

        if let Some(ref variable) = config.variable {
            Self::validate_variable_name("variable", variable.as_bytes())?;
        }

        if config.size_limit == Some(0) {
            return Err(Error::Validation {
                field: "size_limit".into(),
                message: "Size limit must be greater than 0".into(),
            });
        }

        Ok(())
    }

    /// Validate the name of an environment variable.
    ///
    /// Rejects empty names and names containing `=` or NUL. The name is
    /// checked as raw bytes so names that are not UTF-8 can be validated too.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for `field` when the name is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use cleanpath::config::ConfigValidator;
    ///
    /// assert!(ConfigValidator::validate_variable_name("ENVNAME", b"MANPATH").is_ok());
    /// assert!(ConfigValidator::validate_variable_name("ENVNAME", b"A=B").is_err());
    /// ```
    pub fn validate_variable_name(field: &str, name: &[u8]) -> Result<()> {
        if name.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Environment variable name cannot be empty".into(),
            });
        }

        if name.iter().any(|&b| b == b'=' || b == 0) {
            return Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid environment variable name: {:?}",
                    String::from_utf8_lossy(name)
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
        assert!(ConfigValidator::validate(&Config::defaults()).is_ok());
    }

    #[test]
    fn test_validate_delimiter() {
        let config = Config {
            delimiter: Some('\0'),
            ..Config::default()
        };
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(Error::InvalidDelimiter { .. })
        ));

        let config = Config {
            delimiter: Some('ü'),
            ..Config::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_validate_variable_name() {
        assert!(ConfigValidator::validate_variable_name("variable", b"PATH").is_ok());
        assert!(ConfigValidator::validate_variable_name("variable", b"my-odd.var").is_ok());
        assert!(ConfigValidator::validate_variable_name("variable", b"").is_err());
        assert!(ConfigValidator::validate_variable_name("variable", b"A=B").is_err());
        assert!(ConfigValidator::validate_variable_name("variable", b"A\0").is_err());
    }

    #[test]
    fn test_validate_empty_variable_in_config() {
        let config = Config {
            variable: Some(String::new()),
            ..Config::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "variable"));
    }

    #[test]
    fn test_validate_zero_size_limit() {
        let config = Config {
            size_limit: Some(0),
            ..Config::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());

        let config = Config {
            size_limit: Some(1),
            ..Config::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
