use crate::buffer::{terminated_len, Buffer, Registry};

/// Collapses every run of `delimiter` bytes into a single one, in place.
///
/// Leading delimiters are skipped and a trailing run is dropped entirely,
/// so the result never starts or ends with the delimiter and compacting
/// twice gives the same text as compacting once. The freed tail is zeroed.
///
/// Returns the new logical length, or zero for a released buffer.
///
/// # Examples
///
/// ```
/// use cleanpath::{compact_runs, Buffer, Registry};
///
/// let mut registry = Registry::new();
/// let mut list = Buffer::from_bytes(&mut registry, b"::/a::/b:").unwrap();
/// assert_eq!(compact_runs(&mut registry, &mut list, b':'), 5);
/// assert_eq!(list.as_bytes(&registry), b"/a:/b");
/// ```
pub fn compact_runs(registry: &mut Registry, buffer: &mut Buffer, delimiter: u8) -> usize {
    let Some(block) = registry.block_mut(buffer.handle()) else {
        return 0;
    };
    let len = terminated_len(block);

    let mut read = 0;
    while read < len && block[read] == delimiter {
        read += 1;
    }

    let mut write = 0;
    let mut run = 0usize;
    while read < len {
        let byte = block[read];
        if byte == delimiter {
            run += 1;
        } else {
            run = 0;
        }
        if run <= 1 {
            block[write] = byte;
            write += 1;
        }
        read += 1;
    }
    if run > 0 {
        write -= 1;
    }
    block[write..].fill(0);

    if write != len {
        log::trace!("compacted list from {len} to {write} bytes");
    }
    buffer.length(registry)
}
