use std::borrow::Cow;

use crate::buffer::{Buffer, Registry};
use crate::error::Result;
use crate::filter::TokenFilter;

/// Counts of what [`walk_and_clean`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Later occurrences of a token that were removed.
    pub duplicates: usize,
    /// Tokens the filter rejected.
    pub rejected: usize,
}

/// Where the walk continues from.
///
/// A removal shifts everything after it to the left, so the offset of the
/// removed token is where the next token now starts.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    Scanning { start: usize },
    Restarting { start: usize },
    Done,
}

/// Walks the tokens of `buffer` from left to right, removing duplicates and
/// tokens rejected by `filter`.
///
/// For every token, later occurrences of the same bytes are spliced out
/// first, so the leftmost occurrence is the one that survives. Then the
/// filter decides whether the token itself stays. A single trailing
/// delimiter left by a removal at the end of the list is stripped.
///
/// Empty tokens are expected to be gone already; run [`compact_runs`]
/// first.
///
/// [`compact_runs`]: crate::compact_runs
///
/// # Errors
///
/// Returns [`Error::Allocation`](crate::Error::Allocation) if the scratch
/// buffers cannot be created or grown. The scratch buffers are released
/// either way.
///
/// # Examples
///
/// ```
/// use cleanpath::{walk_and_clean, Buffer, Registry};
///
/// let mut registry = Registry::new();
/// let mut list = Buffer::from_bytes(&mut registry, b"/usr/bin:/usr/lib:/opt/bin:/usr/bin").unwrap();
/// let mut only_bin = |token: &[u8]| token.ends_with(b"/bin");
///
/// let summary = walk_and_clean(&mut registry, &mut list, b':', &mut only_bin).unwrap();
/// assert_eq!(list.as_bytes(&registry), b"/usr/bin:/opt/bin");
/// assert_eq!((summary.duplicates, summary.rejected), (1, 1));
/// ```
pub fn walk_and_clean<F>(
    registry: &mut Registry,
    buffer: &mut Buffer,
    delimiter: u8,
    filter: &mut F,
) -> Result<WalkSummary>
where
    F: TokenFilter + ?Sized,
{
    let mut token = Buffer::new(registry, 0)?;
    let mut candidate = match Buffer::new(registry, 0) {
        Ok(candidate) => candidate,
        Err(err) => {
            token.destroy(registry);
            return Err(err);
        }
    };

    let result = walk(registry, buffer, delimiter, filter, &mut token, &mut candidate);
    token.destroy(registry);
    candidate.destroy(registry);
    let summary = result?;

    let len = buffer.length(registry);
    if buffer.as_bytes(registry).last() == Some(&delimiter) {
        buffer.truncate(registry, len - 1);
    }
    Ok(summary)
}

fn walk<F>(
    registry: &mut Registry,
    buffer: &mut Buffer,
    delimiter: u8,
    filter: &mut F,
    token: &mut Buffer,
    candidate: &mut Buffer,
) -> Result<WalkSummary>
where
    F: TokenFilter + ?Sized,
{
    let mut summary = WalkSummary::default();
    let mut cursor = Cursor::Scanning { start: 0 };

    loop {
        let start = match cursor {
            Cursor::Scanning { start } => start,
            Cursor::Restarting { start } => {
                log::trace!("rescanning from offset {start}");
                start
            }
            Cursor::Done => break,
        };

        let len = buffer.length(registry);
        let end = match buffer.index_of(registry, delimiter, start) {
            Some(end) if start < len => end,
            _ => {
                cursor = Cursor::Done;
                continue;
            }
        };

        token.copy_range(registry, buffer, start, end)?;
        log::debug!("evaluate \"{}\"", show(token.as_bytes(registry)));

        summary.duplicates += remove_duplicates(registry, buffer, delimiter, token, candidate, end + 1)?;

        if filter.keep(token.as_bytes(registry)) {
            cursor = Cursor::Scanning { start: end + 1 };
            continue;
        }

        let stop = if end < buffer.length(registry) { end + 1 } else { end };
        cursor = match buffer.splice(registry, start, stop, None)? {
            Some(_) => {
                summary.rejected += 1;
                log::debug!(
                    "removed token \"{}\" leaving \"{}\"",
                    show(token.as_bytes(registry)),
                    show(buffer.as_bytes(registry))
                );
                Cursor::Restarting { start }
            }
            None => Cursor::Scanning { start: end + 1 },
        };
    }

    Ok(summary)
}

/// Splices out every token at or after `from` that equals `token`.
///
/// After a removal the scan resumes at the same offset, which now holds
/// the token that followed the removed one.
fn remove_duplicates(
    registry: &mut Registry,
    buffer: &mut Buffer,
    delimiter: u8,
    token: &Buffer,
    candidate: &mut Buffer,
    from: usize,
) -> Result<usize> {
    let mut removed = 0;
    let mut scan = from;

    loop {
        let len = buffer.length(registry);
        if scan >= len {
            break;
        }
        let Some(end) = buffer.index_of(registry, delimiter, scan) else {
            break;
        };

        candidate.copy_range(registry, buffer, scan, end)?;
        log::trace!("duplicate candidate \"{}\"", show(candidate.as_bytes(registry)));
        if !candidate.equals(registry, token) {
            scan = end + 1;
            continue;
        }

        let stop = if end < len { end + 1 } else { end };
        if buffer.splice(registry, scan, stop, None)?.is_none() {
            break;
        }
        removed += 1;
        log::debug!("duplicate \"{}\" removed", show(token.as_bytes(registry)));
    }

    Ok(removed)
}

fn show(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
