//! Growable, NUL-terminated byte buffers.
//!
//! A [`Buffer`] is a small record holding a [`Handle`] into a [`Registry`],
//! which owns the actual storage. Every operation therefore takes the
//! registry explicitly.
//!
//! # Invariants
//!
//! - The logical length is the offset of the first NUL byte in the storage.
//! - Every byte from the logical length to the end of the storage is zero
//!   after any mutation, so the length can always be recomputed by scanning.
//! - Storage is sized in multiples of [`CHUNK_SIZE`] and always leaves room
//!   for the terminating NUL.
//!
//! # Examples
//!
//! ```
//! use cleanpath::{Buffer, Registry};
//!
//! let mut registry = Registry::new();
//! let mut buffer = Buffer::new(&mut registry, 8).unwrap();
//!
//! buffer.append_bytes(&mut registry, b"/usr/bin", usize::MAX).unwrap();
//! buffer.append_bytes(&mut registry, b":/opt/bin", usize::MAX).unwrap();
//! assert_eq!(buffer.as_bytes(&registry), b"/usr/bin:/opt/bin");
//!
//! let removed = buffer.splice(&mut registry, 0, 9, None).unwrap();
//! assert_eq!(removed, Some(9));
//! assert_eq!(buffer.as_bytes(&registry), b"/opt/bin");
//! ```

pub mod registry;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use registry::{Handle, Registry, SLOT_BLOCK};

use crate::error::{Error, Result};

/// Allocation granularity for buffer storage, in bytes.
pub const CHUNK_SIZE: usize = 64;

/// Storage size for a buffer that must hold `min_capacity` bytes of text.
///
/// One byte is added for the terminator and the total is rounded up to the
/// next multiple of [`CHUNK_SIZE`].
///
/// # Examples
///
/// ```
/// use cleanpath::buffer::{chunked_capacity, CHUNK_SIZE};
///
/// assert_eq!(chunked_capacity(0), CHUNK_SIZE);
/// assert_eq!(chunked_capacity(CHUNK_SIZE - 1), CHUNK_SIZE);
/// assert_eq!(chunked_capacity(CHUNK_SIZE), 2 * CHUNK_SIZE);
/// ```
#[must_use]
pub const fn chunked_capacity(min_capacity: usize) -> usize {
    min_capacity.saturating_add(1).div_ceil(CHUNK_SIZE) * CHUNK_SIZE
}

/// Offset of the first NUL in `bytes`, or zero when there is none.
///
/// Storage without a terminator holds no text.
#[must_use]
pub fn terminated_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(0)
}

/// Length of the text in `bytes`, stopping at the first NUL or at `limit`,
/// whichever comes first.
///
/// # Examples
///
/// ```
/// use cleanpath::buffer::bounded_len;
///
/// assert_eq!(bounded_len(b"abc", 10), 3);
/// assert_eq!(bounded_len(b"abc", 2), 2);
/// assert_eq!(bounded_len(b"a\0c", 10), 1);
/// ```
#[must_use]
pub fn bounded_len(bytes: &[u8], limit: usize) -> usize {
    let bounded = &bytes[..limit.min(bytes.len())];
    bounded.iter().position(|&b| b == 0).unwrap_or(bounded.len())
}

/// A growable byte string whose storage lives in a [`Registry`].
///
/// `Buffer` is not `Clone`: two records sharing one storage
/// slot would let one of them release the other's bytes.
#[derive(Debug)]
pub struct Buffer {
    home: Handle,
    storage: Handle,
    len: usize,
    capacity: usize,
}

impl Buffer {
    /// Creates an empty buffer able to hold at least `min_capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the registry cannot provide storage.
    pub fn new(registry: &mut Registry, min_capacity: usize) -> Result<Self> {
        let capacity = chunked_capacity(min_capacity);
        let handle = match registry.register(capacity) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("Fatal: cannot create buffer: {err}");
                return Err(err);
            }
        };

        Ok(Self {
            home: handle,
            storage: handle,
            len: 0,
            capacity,
        })
    }

    /// Creates a buffer holding a copy of `text` (up to its first NUL).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the registry cannot provide storage.
    pub fn from_bytes(registry: &mut Registry, text: &[u8]) -> Result<Self> {
        let mut buffer = Self::new(registry, text.len())?;
        buffer.append_bytes(registry, text, text.len())?;
        Ok(buffer)
    }

    /// Bytes of storage available, the terminator included.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The registry handle of the current storage.
    #[must_use]
    pub const fn handle(&self) -> Handle {
        self.storage
    }

    /// Whether the storage of this buffer is still live.
    #[must_use]
    pub fn is_live(&self, registry: &Registry) -> bool {
        registry.is_live(self.storage)
    }

    /// Recomputes the logical length by scanning for the first NUL.
    ///
    /// Returns zero for released storage or storage without a terminator.
    pub fn length(&mut self, registry: &Registry) -> usize {
        self.len = registry.block(self.storage).map_or(0, terminated_len);
        self.len
    }

    /// The logical text, without the terminator.
    #[must_use]
    pub fn as_bytes<'r>(&self, registry: &'r Registry) -> &'r [u8] {
        registry
            .block(self.storage)
            .map_or(&[], |block| &block[..terminated_len(block)])
    }

    /// Shrinks the logical length to `new_len`.
    ///
    /// Only shrinking is possible: if `new_len` is not below the current
    /// length the buffer is left as is. Returns the resulting length.
    pub fn truncate(&mut self, registry: &mut Registry, new_len: usize) -> usize {
        let Some(block) = registry.block_mut(self.storage) else {
            self.len = 0;
            return 0;
        };

        let current = terminated_len(block);
        if new_len < current {
            block[new_len..].fill(0);
            self.len = new_len;
        } else {
            self.len = current;
        }
        self.len
    }

    /// Appends the text of `src`, bounded by `limit` and by its first NUL.
    ///
    /// Exactly `bounded_len(src, limit)` bytes are copied. Storage grows as
    /// needed. Returns the new logical length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if growing fails (the buffer is left
    /// unchanged) or [`Error::StaleHandle`] if this buffer was released.
    pub fn append_bytes(&mut self, registry: &mut Registry, src: &[u8], limit: usize) -> Result<usize> {
        let count = bounded_len(src, limit);
        let start = self.reserve(registry, count)?;

        let block = registry.block_mut(self.storage).ok_or(self.stale())?;
        block[start..start + count].copy_from_slice(&src[..count]);
        block[start + count..].fill(0);

        self.len = start + count;
        Ok(self.len)
    }

    /// Appends the whole text of another buffer.
    ///
    /// A released `src` appends nothing.
    ///
    /// # Errors
    ///
    /// See [`Buffer::append_bytes`].
    pub fn append(&mut self, registry: &mut Registry, src: &Buffer) -> Result<usize> {
        self.append_range(registry, src, 0, src.capacity)
    }

    /// Appends the bytes of `src` in `[from, to)`, stopping early at a NUL.
    ///
    /// # Errors
    ///
    /// See [`Buffer::append_bytes`].
    pub fn append_range(
        &mut self,
        registry: &mut Registry,
        src: &Buffer,
        from: usize,
        to: usize,
    ) -> Result<usize> {
        let count = match registry.block(src.storage) {
            Some(block) if from < to && from < block.len() => {
                bounded_len(&block[from..], to - from)
            }
            _ => 0,
        };
        if count == 0 {
            return Ok(self.length(registry));
        }

        let start = self.reserve(registry, count)?;
        let (dest, source) = registry
            .pair_mut(self.storage, src.storage)
            .ok_or(self.stale())?;
        dest[start..start + count].copy_from_slice(&source[from..from + count]);
        dest[start + count..].fill(0);

        self.len = start + count;
        Ok(self.len)
    }

    /// Replaces the contents with `src`, bounded like [`Buffer::append_bytes`].
    ///
    /// # Errors
    ///
    /// See [`Buffer::append_bytes`].
    pub fn copy_bytes(&mut self, registry: &mut Registry, src: &[u8], limit: usize) -> Result<usize> {
        self.truncate(registry, 0);
        self.append_bytes(registry, src, limit)
    }

    /// Replaces the contents with the text of another buffer.
    ///
    /// # Errors
    ///
    /// See [`Buffer::append_bytes`].
    pub fn copy_from(&mut self, registry: &mut Registry, src: &Buffer) -> Result<usize> {
        self.truncate(registry, 0);
        self.append(registry, src)
    }

    /// Replaces the contents with the bytes of `src` in `[from, to)`.
    ///
    /// # Errors
    ///
    /// See [`Buffer::append_bytes`].
    pub fn copy_range(
        &mut self,
        registry: &mut Registry,
        src: &Buffer,
        from: usize,
        to: usize,
    ) -> Result<usize> {
        self.truncate(registry, 0);
        self.append_range(registry, src, from, to)
    }

    /// Finds the first `needle` or NUL at or after `start`.
    ///
    /// The scan covers the whole storage, not just the logical text, and
    /// stops at whichever byte comes first. Returns `None` for released
    /// storage or a start past the end of the storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use cleanpath::{Buffer, Registry};
    ///
    /// let mut registry = Registry::new();
    /// let buffer = Buffer::from_bytes(&mut registry, b"a:bc").unwrap();
    /// assert_eq!(buffer.index_of(&registry, b':', 0), Some(1));
    /// // No delimiter after offset 2: the terminator is found instead.
    /// assert_eq!(buffer.index_of(&registry, b':', 2), Some(4));
    /// ```
    #[must_use]
    pub fn index_of(&self, registry: &Registry, needle: u8, start: usize) -> Option<usize> {
        let block = registry.block(self.storage)?;
        block
            .get(start..)?
            .iter()
            .position(|&b| b == needle || b == 0)
            .map(|offset| start + offset)
    }

    /// Compares two buffers byte for byte.
    ///
    /// Returns zero only when both buffers are live, of equal length and
    /// identical. Otherwise returns the byte difference at the first
    /// mismatch, or 1 for a length mismatch or released storage.
    #[must_use]
    pub fn difference(&self, registry: &Registry, other: &Buffer) -> i32 {
        let (Some(a), Some(b)) = (registry.block(self.storage), registry.block(other.storage))
        else {
            return 1;
        };

        let (a, b) = (&a[..terminated_len(a)], &b[..terminated_len(b)]);
        if a.len() != b.len() {
            return 1;
        }
        a.iter()
            .zip(b)
            .find(|(x, y)| x != y)
            .map_or(0, |(&x, &y)| i32::from(x) - i32::from(y))
    }

    /// Whether two buffers hold exactly the same text.
    #[must_use]
    pub fn equals(&self, registry: &Registry, other: &Buffer) -> bool {
        self.difference(registry, other) == 0
    }

    /// Removes `[from, to)` in place by shifting the rest of the text left.
    ///
    /// If `capture` is given, the removed bytes are appended to it first.
    /// The range may extend past the logical end; the excess is ignored.
    ///
    /// Returns `Ok(None)` without touching anything when the range is empty,
    /// starts at or past the logical end, exceeds the storage, or the buffer
    /// was released. Otherwise returns the number of text bytes removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if `capture` has to grow and cannot.
    pub fn splice(
        &mut self,
        registry: &mut Registry,
        from: usize,
        to: usize,
        capture: Option<&mut Buffer>,
    ) -> Result<Option<usize>> {
        if from >= to || to > self.capacity || !registry.is_live(self.storage) {
            return Ok(None);
        }
        let len = self.length(registry);
        if from >= len {
            return Ok(None);
        }

        if let Some(capture) = capture {
            capture.append_range(registry, self, from, to)?;
        }

        let Some(block) = registry.block_mut(self.storage) else {
            return Ok(None);
        };
        let (mut write, mut read) = (from, to);
        while read < block.len() && block[read] != 0 {
            block[write] = block[read];
            write += 1;
            read += 1;
        }
        block[write..].fill(0);

        self.len = write;
        Ok(Some(len - write))
    }

    /// Releases the storage of this buffer.
    pub fn destroy(self, registry: &mut Registry) {
        if self.storage != self.home {
            registry.release(self.storage);
        }
        registry.release(self.home);
    }

    /// Makes sure `count` more bytes fit and returns the current length.
    fn reserve(&mut self, registry: &mut Registry, count: usize) -> Result<usize> {
        if !registry.is_live(self.storage) {
            return Err(self.stale());
        }

        let current = self.length(registry);
        let needed = current + count + 1;
        if self.capacity < needed {
            self.grow(registry, needed)?;
        }
        Ok(current)
    }

    /// Moves the text into new storage of at least `min_capacity` bytes and
    /// releases the old storage.
    fn grow(&mut self, registry: &mut Registry, min_capacity: usize) -> Result<()> {
        let capacity = chunked_capacity(min_capacity);
        let replacement = match registry.register(capacity) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("Fatal: cannot grow buffer to {capacity} bytes: {err}");
                return Err(err);
            }
        };

        let Some((dest, src)) = registry.pair_mut(replacement, self.storage) else {
            registry.release(replacement);
            return Err(self.stale());
        };
        dest[..src.len()].copy_from_slice(src);

        log::trace!(
            "buffer grown from {} to {capacity} bytes (slot {} -> {})",
            self.capacity,
            self.storage.slot(),
            replacement.slot()
        );
        registry.release(self.storage);
        self.storage = replacement;
        self.capacity = capacity;
        Ok(())
    }

    fn stale(&self) -> Error {
        Error::StaleHandle {
            slot: self.storage.slot(),
        }
    }
}
