//! Allocation registry backing every [`Buffer`](super::Buffer).
//!
//! The registry owns the storage of all buffers and hands out [`Handle`]s.
//! It grows its slot table in fixed blocks, never reuses a slot, and can
//! release every tracked allocation in a single sweep.

use crate::error::{Error, Result};

/// Number of slots the table grows by.
pub const SLOT_BLOCK: usize = 256;

/// Index of the entry that stands for the table itself.
const TABLE_SLOT: usize = 0;

/// A handle to one registry slot.
///
/// Handles are plain values. Once the slot is released, or the registry is
/// swept with [`Registry::release_all`], the handle becomes inert: lookups
/// return nothing and releasing it again is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    epoch: u32,
}

impl Handle {
    /// The slot index inside the registry table.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.slot
    }
}

#[derive(Debug)]
enum Slot {
    Vacant,
    Table,
    Block(Box<[u8]>),
}

impl Slot {
    fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }

    fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }
}

/// Ledger of every live buffer allocation.
///
/// The table is created lazily on the first registration. Slot 0 always
/// refers to the table itself so that a full sweep accounts for it too.
///
/// # Examples
///
/// ```
/// use cleanpath::Registry;
///
/// let mut registry = Registry::new();
/// let handle = registry.register(64).unwrap();
/// assert_eq!(registry.block(handle).map(<[u8]>::len), Some(64));
///
/// registry.release(handle);
/// assert!(registry.block(handle).is_none());
///
/// // Releasing twice is harmless.
/// registry.release(handle);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
    table_capacity: usize,
    live_bytes: usize,
    byte_limit: Option<usize>,
    epoch: u32,
}

impl Registry {
    /// Creates an empty registry without a byte limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that refuses to hold more than `limit` bytes of
    /// buffer storage at once.
    ///
    /// Exceeding the limit is reported exactly like running out of memory.
    #[must_use]
    pub fn with_byte_limit(limit: usize) -> Self {
        Self {
            byte_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Allocates `size` zeroed bytes and records them in a fresh slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage or a larger slot table
    /// cannot be obtained.
    pub fn register(&mut self, size: usize) -> Result<Handle> {
        let block = self.allocate(size)?;
        self.ensure_table()?;

        let slot = self.slots.len();
        self.slots.push(Slot::Block(block));
        self.live_bytes += size;
        log::trace!("registered slot {slot} ({size} bytes)");

        Ok(Handle {
            slot,
            epoch: self.epoch,
        })
    }

    /// Releases the storage behind `handle`.
    ///
    /// Out of range, stale and already released handles are ignored.
    pub fn release(&mut self, handle: Handle) {
        let Some(index) = self.resolve(handle) else {
            return;
        };
        if let Slot::Block(block) = std::mem::replace(&mut self.slots[index], Slot::Vacant) {
            self.live_bytes -= block.len();
            log::trace!("released slot {index} ({} bytes)", block.len());
        }
    }

    /// Releases every tracked allocation, the table included, and resets the
    /// accounting to empty.
    ///
    /// Every handle issued before the sweep becomes inert. Returns the number
    /// of buffer allocations that were still live.
    pub fn release_all(&mut self) -> usize {
        let live = self.live_blocks();
        self.slots = Vec::new();
        self.table_capacity = 0;
        self.live_bytes = 0;
        self.epoch = self.epoch.wrapping_add(1);
        log::trace!("released all ({live} live blocks)");
        live
    }

    /// The storage behind `handle`, if it is still live.
    #[must_use]
    pub fn block(&self, handle: Handle) -> Option<&[u8]> {
        let index = self.resolve(handle)?;
        self.slots[index].bytes()
    }

    /// Mutable access to the storage behind `handle`, if it is still live.
    pub fn block_mut(&mut self, handle: Handle) -> Option<&mut [u8]> {
        let index = self.resolve(handle)?;
        self.slots[index].bytes_mut()
    }

    /// Mutable access to `dest` alongside shared access to `src`.
    ///
    /// Returns `None` when either handle is not live or both name the same
    /// slot.
    pub fn pair_mut(&mut self, dest: Handle, src: Handle) -> Option<(&mut [u8], &[u8])> {
        let dest = self.resolve(dest)?;
        let src = self.resolve(src)?;
        if dest == src {
            return None;
        }

        if dest < src {
            let (low, high) = self.slots.split_at_mut(src);
            Some((low[dest].bytes_mut()?, high[0].bytes()?))
        } else {
            let (low, high) = self.slots.split_at_mut(dest);
            Some((high[0].bytes_mut()?, low[src].bytes()?))
        }
    }

    /// Whether `handle` still refers to live storage.
    #[must_use]
    pub fn is_live(&self, handle: Handle) -> bool {
        self.block(handle).is_some()
    }

    /// Number of buffer allocations currently live.
    #[must_use]
    pub fn live_blocks(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Block(_)))
            .count()
    }

    /// Total bytes held by live buffer allocations.
    #[must_use]
    pub const fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    /// Number of slots the table can hold before it grows again.
    #[must_use]
    pub const fn table_capacity(&self) -> usize {
        self.table_capacity
    }

    /// Number of slots handed out so far, the table entry included.
    #[must_use]
    pub fn slots_used(&self) -> usize {
        self.slots.len()
    }

    fn resolve(&self, handle: Handle) -> Option<usize> {
        (handle.epoch == self.epoch
            && handle.slot != TABLE_SLOT
            && handle.slot < self.slots.len())
        .then_some(handle.slot)
    }

    fn allocate(&self, size: usize) -> Result<Box<[u8]>> {
        if let Some(limit) = self.byte_limit {
            if self.live_bytes.saturating_add(size) > limit {
                return Err(Error::Allocation { requested: size });
            }
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(size)
            .map_err(|_| Error::Allocation { requested: size })?;
        storage.resize(size, 0);
        Ok(storage.into_boxed_slice())
    }

    fn ensure_table(&mut self) -> Result<()> {
        if self.slots.is_empty() {
            self.grow_table()?;
            self.slots.push(Slot::Table);
        }
        if self.slots.len() >= self.table_capacity {
            self.grow_table()?;
        }
        Ok(())
    }

    fn grow_table(&mut self) -> Result<()> {
        let wanted = self.table_capacity + SLOT_BLOCK;
        self.slots
            .try_reserve_exact(wanted - self.slots.len())
            .map_err(|_| Error::Allocation {
                requested: wanted * std::mem::size_of::<Slot>(),
            })?;
        self.table_capacity = wanted;
        log::trace!("registry table grown to {wanted} slots");
        Ok(())
    }
}
