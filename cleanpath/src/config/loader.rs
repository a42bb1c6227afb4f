//! Configuration file discovery and loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::Result;

/// Environment variable naming the user configuration file.
pub const CONFIG_PATH_ENV: &str = "CLEANPATH_CONFIG";

/// File name of the user configuration in the home directory.
pub const USER_CONFIG_FILE: &str = ".cleanpath.yaml";

/// A configuration file together with its parsed contents.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path the configuration was read from.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use cleanpath::config::ConfigLoader;
///
/// if let Some(source) = ConfigLoader::load_user_config(None).unwrap() {
///     println!("loaded {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the user configuration file.
    ///
    /// The file is `explicit` if given, else `$CLEANPATH_CONFIG`, else
    /// `~/.cleanpath.yaml`. A missing file is only an error when it was
    /// given explicitly; otherwise `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_user_config(explicit: Option<&Path>) -> Result<Option<ConfigSource>> {
        if let Some(path) = explicit {
            let config = Self::load_file(path)?;
            return Ok(Some(ConfigSource {
                path: path.to_path_buf(),
                config,
            }));
        }

        let Some(path) = Self::user_config_path() else {
            log::debug!("no home directory, skipping user configuration");
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&path)?;
        Ok(Some(ConfigSource { path, config }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// An empty file is an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config = serde_yaml::from_str(&contents)?;
        log::trace!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Where the user configuration file is looked for.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        home::home_dir().map(|home| home.join(USER_CONFIG_FILE))
    }
}
