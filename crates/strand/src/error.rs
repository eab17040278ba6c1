//! Error types for list and arena operations.
//!
//! The core list contract is precondition-based: misuse panics. These errors
//! carry the panic messages and back the checked `try_*` variants on
//! [`LinkedList`](crate::LinkedList).

use std::error::Error;
use std::fmt;

use crate::slot::Slot;

/// Errors reported by the checked list API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// A logical position past the end of the traversal order.
    PositionOutOfBounds {
        /// The requested 0-based position.
        position: usize,
        /// Number of elements in the list.
        len: usize,
    },
    /// A raw slot index that does not hold a live node.
    VacantSlot {
        /// The offending slot.
        slot: Slot,
    },
    /// A capacity request larger than an arena can address.
    CapacityOverflow {
        /// Number of slots requested.
        requested: usize,
        /// Largest supported slot count.
        max: usize,
    },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfBounds { position, len } => {
                write!(f, "position {position} out of bounds for list of length {len}")
            }
            Self::VacantSlot { slot } => {
                write!(f, "slot {slot} does not hold a live node")
            }
            Self::CapacityOverflow { requested, max } => {
                write!(
                    f,
                    "capacity overflow: requested {requested} slots, maximum {max}"
                )
            }
        }
    }
}

impl Error for ListError {}

/// Internal arena invariant violations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The bitmap has no free slot left. Callers size arenas before
    /// inserting, so hitting this is a bug.
    Full {
        /// Slot capacity of the exhausted arena.
        capacity: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { capacity } => {
                write!(f, "node arena full: no free slot among {capacity}")
            }
        }
    }
}

impl Error for ArenaError {}
