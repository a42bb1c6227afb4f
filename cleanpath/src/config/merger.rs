//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use cleanpath::config::{Config, ConfigMerger};
///
/// let low = Config { variable: Some("PATH".to_string()), ..Default::default() };
/// let high = Config { variable: Some("MANPATH".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.variable, Some("MANPATH".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge configuration sources into the built-in defaults.
    ///
    /// Sources are given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::defaults();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.delimiter.is_some() {
            target.delimiter = source.delimiter;
        }

        if source.check.is_some() {
            target.check = source.check;
        }

        if source.before.is_some() {
            target.before = source.before;
        }

        if source.variable.is_some() {
            target.variable.clone_from(&source.variable);
        }

        if source.size_limit.is_some() {
            target.size_limit = source.size_limit;
        }

        if source.disable_size_limit.is_some() {
            target.disable_size_limit = source.disable_size_limit;
        }
    }
}
