//! The complete cleaning pipeline.
//!
//! The existing list and the caller's additions are joined into one buffer,
//! delimiter runs are compacted and the token walk removes duplicates and
//! rejected tokens. The cleaned text is copied out and every working
//! buffer is released before returning.

use std::fmt;

use crate::buffer::{Buffer, Registry};
use crate::error::{Error, Result};
use crate::filter::{CheckMode, FilesystemFilter, TokenFilter};
use crate::list::{compact_runs, walk_and_clean};

/// Default maximum output size: a typical `ARG_MAX` of 128 KiB minus one.
pub const DEFAULT_SIZE_LIMIT: usize = 131_071;

/// Default token delimiter.
pub const DEFAULT_DELIMITER: u8 = b':';

/// Where the additions go relative to the existing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Existing list first, then the additions.
    #[default]
    Append,
    /// Additions first, then the existing list.
    Prepend,
}

impl Order {
    /// `Prepend` when `before` is set, otherwise `Append`.
    #[must_use]
    pub const fn from_before(before: bool) -> Self {
        if before {
            Self::Prepend
        } else {
            Self::Append
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => write!(f, "append"),
            Self::Prepend => write!(f, "prepend"),
        }
    }
}

/// Fully resolved settings for one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    /// The token separator.
    pub delimiter: u8,
    /// Where additions are placed.
    pub order: Order,
    /// The filesystem check each token must pass.
    pub check: CheckMode,
    /// Maximum output size in bytes, `None` for unlimited.
    pub size_limit: Option<usize>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            order: Order::Append,
            check: CheckMode::None,
            size_limit: Some(DEFAULT_SIZE_LIMIT),
        }
    }
}

impl CleanOptions {
    /// The filter matching [`CleanOptions::check`].
    #[must_use]
    pub const fn filter(&self) -> FilesystemFilter {
        FilesystemFilter::new(self.check)
    }
}

/// Parses a delimiter given as text.
///
/// The text must be exactly one ASCII character other than NUL.
///
/// # Errors
///
/// Returns [`Error::InvalidDelimiter`] otherwise.
///
/// # Examples
///
/// ```
/// use cleanpath::parse_delimiter;
///
/// assert_eq!(parse_delimiter(";").unwrap(), b';');
/// assert!(parse_delimiter("::").is_err());
/// assert!(parse_delimiter("").is_err());
/// ```
pub fn parse_delimiter(value: &str) -> Result<u8> {
    let invalid = |reason: &str| Error::InvalidDelimiter {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match value.as_bytes() {
        [] => Err(invalid("must not be empty")),
        [0] => Err(invalid("must not be NUL")),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(invalid("must be a single ASCII character")),
    }
}

/// Joins `existing` and `additions` into one buffer.
///
/// Every addition is preceded by the delimiter, and one more delimiter
/// separates the additions from the existing list. The result may contain
/// empty tokens; [`compact_runs`] removes them.
///
/// # Errors
///
/// Returns [`Error::Allocation`] if the buffer cannot be created or grown.
/// Nothing stays registered in that case.
pub fn build_list<S>(
    registry: &mut Registry,
    existing: &[u8],
    additions: &[S],
    delimiter: u8,
    order: Order,
) -> Result<Buffer>
where
    S: AsRef<[u8]>,
{
    let extra_len: usize = additions.iter().map(|a| a.as_ref().len() + 1).sum();
    let mut list = Buffer::new(registry, existing.len() + extra_len + 1)?;

    match join_into(registry, &mut list, existing, additions, delimiter, order) {
        Ok(()) => {
            log::trace!("joined list: \"{}\"", String::from_utf8_lossy(list.as_bytes(registry)));
            Ok(list)
        }
        Err(err) => {
            list.destroy(registry);
            Err(err)
        }
    }
}

fn join_into<S>(
    registry: &mut Registry,
    list: &mut Buffer,
    existing: &[u8],
    additions: &[S],
    delimiter: u8,
    order: Order,
) -> Result<()>
where
    S: AsRef<[u8]>,
{
    let separator = [delimiter];
    let mut push = |bytes: &[u8]| list.append_bytes(registry, bytes, bytes.len()).map(drop);

    if order == Order::Append {
        push(existing)?;
        push(&separator)?;
    }
    for addition in additions {
        push(&separator)?;
        push(addition.as_ref())?;
    }
    if order == Order::Prepend {
        push(&separator)?;
        push(existing)?;
    }
    Ok(())
}

/// Runs the whole pipeline and returns the cleaned list.
///
/// `filter` decides which tokens stay; pass [`CleanOptions::filter`] for
/// the configured filesystem check or [`KeepAll`](crate::KeepAll) for none.
/// The size limit is not applied here, see [`apply_size_limit`].
///
/// # Errors
///
/// Returns [`Error::Allocation`] if any working buffer cannot be obtained.
/// No partial output is produced and every working buffer is released.
///
/// # Examples
///
/// ```
/// use cleanpath::{clean, CleanOptions, Order, Registry};
///
/// let mut registry = Registry::new();
/// let options = CleanOptions { order: Order::Prepend, ..CleanOptions::default() };
/// let mut filter = options.filter();
/// let cleaned = clean(&mut registry, b"/usr/bin:/bin", &["/bin"], &options, &mut filter).unwrap();
/// assert_eq!(cleaned, b"/bin:/usr/bin");
/// assert_eq!(registry.live_blocks(), 0);
/// ```
pub fn clean<S, F>(
    registry: &mut Registry,
    existing: &[u8],
    additions: &[S],
    options: &CleanOptions,
    filter: &mut F,
) -> Result<Vec<u8>>
where
    S: AsRef<[u8]>,
    F: TokenFilter + ?Sized,
{
    let delimiter = options.delimiter;
    let mut list = build_list(registry, existing, additions, delimiter, options.order)?;

    compact_runs(registry, &mut list, delimiter);
    let walked = walk_and_clean(registry, &mut list, delimiter, filter);
    let output = list.as_bytes(registry).to_vec();
    list.destroy(registry);

    let summary = walked?;
    log::debug!(
        "cleaned list: {} duplicates and {} rejected tokens removed",
        summary.duplicates,
        summary.rejected
    );
    Ok(output)
}

/// Truncates `output` to at most `limit` bytes.
///
/// A cut that ends on `delimiter` also drops that delimiter, so the result
/// never ends with one. The last token may still be cut short.
///
/// Returns whether anything was cut.
///
/// # Examples
///
/// ```
/// use cleanpath::apply_size_limit;
///
/// let mut output = b"/a:/b:/c".to_vec();
/// assert!(apply_size_limit(&mut output, 4, b':'));
/// assert_eq!(output, b"/a:/");
/// assert!(apply_size_limit(&mut output, 3, b':'));
/// assert_eq!(output, b"/a");
/// assert!(!apply_size_limit(&mut output, 100, b':'));
/// ```
pub fn apply_size_limit(output: &mut Vec<u8>, limit: usize, delimiter: u8) -> bool {
    if output.len() <= limit {
        return false;
    }
    log::warn!("Output size ({}) larger than {limit}, truncated", output.len());
    output.truncate(limit);
    if output.last() == Some(&delimiter) {
        output.pop();
    }
    true
}
