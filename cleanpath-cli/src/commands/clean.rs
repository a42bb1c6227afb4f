//! Clean command implementation.
//!
//! Reads a delimited environment variable, merges extra entries into it and
//! prints the cleaned list.

use crate::error::CliError;
use crate::utils::{
    load_configuration, os_bytes, read_variable, validate_variable_name, write_output,
    GlobalOptions,
};
use clap::Args;
use cleanpath::{apply_size_limit, clean, parse_delimiter, CheckMode, Config, Registry};
use std::ffi::OsString;

/// Arguments for cleaning a delimited list.
#[derive(Args, Debug)]
pub struct CleanCommand {
    /// Drop entries that do not exist
    #[arg(short = 'e', long, conflicts_with_all = ["check_files", "check_paths"])]
    pub exists: bool,

    /// Drop entries that are not regular files
    #[arg(short = 'f', long = "checkfiles", conflicts_with = "check_paths")]
    pub check_files: bool,

    /// Drop entries that are not directories
    #[arg(short = 'P', long = "checkpaths")]
    pub check_paths: bool,

    /// Put the extra entries before the existing ones
    #[arg(short = 'b', long)]
    pub before: bool,

    /// Use C as the delimiter instead of ':'
    #[arg(short = 'F', long, value_name = "C")]
    pub delimiter: Option<String>,

    /// Do not read a variable; every argument is an entry
    #[arg(short = 'X', long = "noenv")]
    pub no_env: bool,

    /// Do not truncate long output
    #[arg(short = 'S', long = "nosizelimit")]
    pub no_size_limit: bool,

    /// Variable to read (ENVNAME) followed by entries to add
    #[arg(value_name = "ENVNAME_OR_ENTRY")]
    pub words: Vec<OsString>,

    /// Entries to add, taken verbatim
    #[arg(last = true, value_name = "ENTRY")]
    pub extra: Vec<OsString>,
}

impl CleanCommand {
    /// Execute the clean command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Build command-line overrides
        let overrides = self.overrides()?;

        // 2. Load configuration
        let config = load_configuration(global, overrides)?;
        let options = config.resolve().map_err(|e| CliError::Config(e.to_string()))?;
        log::trace!("options: {options:?}, no_env: {}", self.no_env);

        if self.before && self.no_env {
            log::warn!("--before meaningless with --noenv");
        }

        // 3. Work out what to read and what to add
        let (variable, additions) = split_positionals(
            self.no_env,
            self.words,
            self.extra,
            OsString::from(config.variable_name()),
        );
        if let Some(name) = &variable {
            validate_variable_name(name)?;
        }
        let existing = variable.as_deref().map(read_variable).unwrap_or_default();
        let additions: Vec<Vec<u8>> = additions.into_iter().map(os_bytes).collect();

        // 4. Clean
        let mut registry = Registry::new();
        let mut filter = options.filter();
        let mut output = match clean(&mut registry, &existing, &additions, &options, &mut filter) {
            Ok(output) => output,
            Err(e) => {
                registry.release_all();
                return Err(e.into());
            }
        };

        // 5. Leave room for `NAME=` when the result goes back into a variable
        if let Some(limit) = options.size_limit {
            let reserved = variable.as_ref().map_or(0, |name| name.len() + 1);
            apply_size_limit(&mut output, limit.saturating_sub(reserved), options.delimiter);
        }

        write_output(&output)
    }

    fn overrides(&self) -> Result<Config, CliError> {
        let delimiter = match &self.delimiter {
            Some(text) => Some(char::from(
                parse_delimiter(text).map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            )),
            None => None,
        };

        let check = if self.exists {
            Some(CheckMode::Exists)
        } else if self.check_files {
            Some(CheckMode::File)
        } else if self.check_paths {
            Some(CheckMode::Dir)
        } else {
            None
        };

        Ok(Config {
            delimiter,
            check,
            before: self.before.then_some(true),
            disable_size_limit: self.no_size_limit.then_some(true),
            ..Config::default()
        })
    }
}

/// Splits the positional arguments into the variable to read and the
/// entries to add.
///
/// Without `no_env` the first word names the variable and `default_variable`
/// is used when there are no words.
fn split_positionals(
    no_env: bool,
    words: Vec<OsString>,
    extra: Vec<OsString>,
    default_variable: OsString,
) -> (Option<OsString>, Vec<OsString>) {
    if no_env {
        let mut additions = words;
        additions.extend(extra);
        return (None, additions);
    }

    let mut words = words.into_iter();
    let variable = words.next().unwrap_or(default_variable);
    let additions = words.chain(extra).collect();
    (Some(variable), additions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    fn command() -> CleanCommand {
        CleanCommand {
            exists: false,
            check_files: false,
            check_paths: false,
            before: false,
            delimiter: None,
            no_env: false,
            no_size_limit: false,
            words: Vec::new(),
            extra: Vec::new(),
        }
    }

    #[test]
    fn test_split_default_variable() {
        let (variable, additions) = split_positionals(false, vec![], vec![], "PATH".into());
        assert_eq!(variable, Some(OsString::from("PATH")));
        assert!(additions.is_empty());
    }

    #[test]
    fn test_split_first_word_is_variable() {
        let (variable, additions) =
            split_positionals(false, os(&["MANPATH", "/a", "/b"]), os(&["-c"]), "PATH".into());
        assert_eq!(variable, Some(OsString::from("MANPATH")));
        assert_eq!(additions, os(&["/a", "/b", "-c"]));
    }

    #[test]
    fn test_split_trailing_only_reads_default() {
        let (variable, additions) = split_positionals(false, vec![], os(&["/x"]), "PATH".into());
        assert_eq!(variable, Some(OsString::from("PATH")));
        assert_eq!(additions, os(&["/x"]));
    }

    #[test]
    fn test_split_noenv() {
        let (variable, additions) =
            split_positionals(true, os(&["/a", "/b"]), os(&["/c"]), "PATH".into());
        assert_eq!(variable, None);
        assert_eq!(additions, os(&["/a", "/b", "/c"]));
    }

    #[test]
    fn test_overrides_empty_by_default() {
        assert_eq!(command().overrides().unwrap(), Config::default());
    }

    #[test]
    fn test_overrides_from_flags() {
        let cmd = CleanCommand {
            check_paths: true,
            before: true,
            delimiter: Some(";".to_string()),
            no_size_limit: true,
            ..command()
        };
        let config = cmd.overrides().unwrap();
        assert_eq!(config.delimiter, Some(';'));
        assert_eq!(config.check, Some(CheckMode::Dir));
        assert_eq!(config.before, Some(true));
        assert_eq!(config.disable_size_limit, Some(true));
        assert_eq!(config.variable, None);
    }

    #[test]
    fn test_bad_delimiter_is_invalid_argument() {
        let cmd = CleanCommand {
            delimiter: Some("::".to_string()),
            ..command()
        };
        assert!(matches!(cmd.overrides(), Err(CliError::InvalidArguments(_))));
    }
}
