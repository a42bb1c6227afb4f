//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from defaults, the user file, the environment and
/// programmatic overrides, in that order of increasing precedence.
///
/// # Examples
///
/// ```
/// use cleanpath::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { before: Some(true), ..Config::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.before, Some(true));
/// assert_eq!(config.delimiter, Some(':'));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that consults every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads this file instead of discovering the user configuration.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores CLEANPATH_* environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable holds an invalid value, or the merged result is invalid.
    pub fn build(self) -> Result<Config> {
        let mut sources = Vec::new();
        if !self.skip_files {
            if let Some(source) = ConfigLoader::load_user_config(self.config_file.as_deref())? {
                log::debug!("using configuration file {}", source.path.display());
                ConfigValidator::validate(&source.config)?;
                sources.push(source);
            }
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        log::trace!("resolved configuration: {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CheckMode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_only() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::defaults());
    }

    #[test]
    fn test_explicit_file_then_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cleanpath.yaml");
        fs::write(&path, "check: exists\nvariable: MANPATH\n").unwrap();

        let config = ConfigBuilder::new()
            .with_config_file(&path)
            .skip_env()
            .with_config(Config {
                check: Some(CheckMode::Dir),
                ..Config::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.check, Some(CheckMode::Dir));
        assert_eq!(config.variable.as_deref(), Some("MANPATH"));
    }

    #[test]
    fn test_invalid_file_value_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cleanpath.yaml");
        fs::write(&path, "size_limit: 0\n").unwrap();

        let result = ConfigBuilder::new().with_config_file(&path).skip_env().build();
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                variable: Some("A=B".to_string()),
                ..Config::default()
            })
            .build();
        assert!(result.is_err());
    }
}
