//! Slot indices and generation-tagged links.
//!
//! A [`Slot`] names a storage location inside a node arena. It is the index
//! type of the list's sequence protocol and carries no ownership: whether a
//! slot holds a node is decided by the arena's occupancy bitmap alone.
//!
//! Links between nodes are [`Link`]s, which pair a slot with the generation
//! the slot had when the link was written. Freeing a slot bumps its
//! generation, so a link left behind by a removal stays dead even after the
//! slot is handed out again.

use std::fmt;

/// Largest number of slots an arena may hold. `u32::MAX` itself is reserved
/// for [`Slot::END`].
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Raw index of a node slot.
///
/// Two lists with equal contents may expose different slot values; only
/// stepping with [`LinkedList::index_after`](crate::LinkedList::index_after)
/// and membership checks are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(pub(crate) u32);

impl Slot {
    /// Past-the-end sentinel. Never equal to an occupied slot.
    pub const END: Slot = Slot(u32::MAX);

    /// Wrap a raw slot number.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw slot number.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The slot number as an array index.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the [`Slot::END`] sentinel.
    pub const fn is_end(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            f.write_str("end")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<u32> for Slot {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Pointer from one node (or the header) to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) slot: Slot,
    pub(crate) generation: u32,
}

impl Link {
    pub(crate) fn new(slot: Slot, generation: u32) -> Self {
        Self { slot, generation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_distinct_from_any_addressable_slot() {
        assert!(Slot::END.is_end());
        assert_eq!(Slot::END.index(), MAX_CAPACITY);
        assert!(!Slot::new(0).is_end());
        assert!(!Slot::new(u32::MAX - 1).is_end());
    }

    #[test]
    fn display_formats_sentinel_as_end() {
        assert_eq!(Slot::new(5).to_string(), "5");
        assert_eq!(Slot::END.to_string(), "end");
    }

    #[test]
    fn raw_round_trips_through_from() {
        let slot = Slot::from(42);
        assert_eq!(slot.raw(), 42);
        assert_eq!(slot.index(), 42);
    }
}
