//! Per-token keep/reject checks.
//!
//! The token walk asks a [`TokenFilter`] whether each surviving token stays
//! in the list. The trait keeps the filesystem out of the rewriting engine
//! so tests can supply closures instead.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Decides whether a token stays in the list.
///
/// Implemented for any `FnMut(&[u8]) -> bool`.
///
/// # Examples
///
/// ```
/// use cleanpath::TokenFilter;
///
/// let mut only_bin = |token: &[u8]| token.ends_with(b"/bin");
/// assert!(only_bin.keep(b"/usr/bin"));
/// assert!(!only_bin.keep(b"/usr/lib"));
/// ```
pub trait TokenFilter {
    /// Returns `true` to keep `token`, `false` to remove it.
    fn keep(&mut self, token: &[u8]) -> bool;
}

impl<F> TokenFilter for F
where
    F: FnMut(&[u8]) -> bool,
{
    fn keep(&mut self, token: &[u8]) -> bool {
        self(token)
    }
}

/// A filter that keeps every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl TokenFilter for KeepAll {
    fn keep(&mut self, _token: &[u8]) -> bool {
        true
    }
}

/// Which filesystem check a token must pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// No check; every token is kept.
    #[default]
    None,
    /// The token must name something that exists.
    Exists,
    /// The token must name a regular file.
    File,
    /// The token must name a directory.
    Dir,
}

impl CheckMode {
    /// Parses a check mode from a string.
    ///
    /// Recognizes: "none", "exists", "file", "dir" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use cleanpath::CheckMode;
    ///
    /// assert_eq!(CheckMode::parse("DIR").unwrap(), CheckMode::Dir);
    /// assert!(CheckMode::parse("symlink").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "exists" => Ok(Self::Exists),
            "file" => Ok(Self::File),
            "dir" => Ok(Self::Dir),
            _ => Err(format!("invalid check mode: {s}")),
        }
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Exists => write!(f, "exists"),
            Self::File => write!(f, "file"),
            Self::Dir => write!(f, "dir"),
        }
    }
}

/// Outcome of a filesystem check on one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The token passes.
    Keep,
    /// Nothing exists at the token's path.
    Missing,
    /// Something exists but it is not of the wanted type.
    WrongType,
}

/// Checks tokens against the filesystem.
///
/// Symlinks are followed, so a link to a directory passes [`CheckMode::Dir`].
///
/// # Examples
///
/// ```
/// use cleanpath::{CheckMode, FilesystemFilter, TokenFilter};
///
/// let mut filter = FilesystemFilter::new(CheckMode::Dir);
/// assert!(filter.keep(std::env::temp_dir().to_string_lossy().as_bytes()));
/// assert!(!filter.keep(b"/definitely/not/a/real/path"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FilesystemFilter {
    mode: CheckMode,
}

impl FilesystemFilter {
    /// Creates a filter applying `mode`.
    #[must_use]
    pub const fn new(mode: CheckMode) -> Self {
        Self { mode }
    }

    /// The check this filter applies.
    #[must_use]
    pub const fn mode(&self) -> CheckMode {
        self.mode
    }

    /// Runs the check on `token` and reports why it failed, if it did.
    #[must_use]
    pub fn evaluate(&self, token: &[u8]) -> Verdict {
        if self.mode == CheckMode::None {
            return Verdict::Keep;
        }

        let Ok(metadata) = fs::metadata(token_path(token)) else {
            return Verdict::Missing;
        };
        let matches = match self.mode {
            CheckMode::None | CheckMode::Exists => true,
            CheckMode::File => metadata.is_file(),
            CheckMode::Dir => metadata.is_dir(),
        };
        if matches {
            Verdict::Keep
        } else {
            Verdict::WrongType
        }
    }
}

impl TokenFilter for FilesystemFilter {
    fn keep(&mut self, token: &[u8]) -> bool {
        match self.evaluate(token) {
            Verdict::Keep => true,
            Verdict::Missing => {
                log::debug!("Not exists: \"{}\"", String::from_utf8_lossy(token));
                false
            }
            Verdict::WrongType => {
                log::debug!(
                    "mode failure: \"{}\" is not a {}",
                    String::from_utf8_lossy(token),
                    self.mode
                );
                false
            }
        }
    }
}

#[cfg(unix)]
fn token_path(token: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(token))
}

#[cfg(not(unix))]
fn token_path(token: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(token).into_owned())
}
