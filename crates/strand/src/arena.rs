//! Fixed-capacity node arena with an intrusive singly-linked chain.
//!
//! A [`NodeArena`] owns a header (capacity, live count, head link), an
//! occupancy [`SlotBitmap`] and a fixed array of node slots. Each node stores
//! its element and a [`Link`] to its successor. There are no back-pointers.
//!
//! # Liveness
//!
//! The bitmap is the only source of truth for whether a slot holds a node.
//! A successor link is followed only when its slot is occupied *and* its
//! generation matches the slot's current generation:
//!
//! ```text
//! head ─► [3|g0] ─► [0|g2] ─► [5|g1] ─► (stale link to freed slot 1)
//! ```
//!
//! Removing a node whose successor is live moves the successor's payload into
//! the removed node's slot and frees the successor's slot instead. Removing a
//! node without a live successor frees its own slot and leaves the
//! predecessor holding a stale link. Freeing bumps the slot generation, so
//! that stale link can never reach a node placed in the slot later.

use std::fmt;

use crate::bitmap::{SlotBitmap, BITS_PER_WORD};
use crate::error::{ArenaError, ListError};
use crate::iter::{Indices, Iter};
use crate::slot::{Link, Slot, MAX_CAPACITY};

/// Storage for one slot.
struct Node<T> {
    /// `Some` exactly when the slot's bitmap bit is set.
    element: Option<T>,
    /// Successor link. May be stale.
    next: Option<Link>,
    /// Bumped every time the slot is freed.
    generation: u32,
}

impl<T> Node<T> {
    fn vacant() -> Self {
        Self {
            element: None,
            next: None,
            generation: 0,
        }
    }
}

/// Header, bitmap and node slots of a single list buffer.
///
/// The capacity is fixed at creation; growing a list means building a new
/// arena. Slot allocation always picks the lowest free slot, so arenas built
/// by the same sequence of operations have identical layouts.
pub struct NodeArena<T> {
    /// Number of live nodes. Always equals the bitmap popcount.
    count: usize,
    /// First node in traversal order. `None` iff `count == 0`.
    head: Option<Link>,
    bitmap: SlotBitmap,
    nodes: Box<[Node<T>]>,
}

impl<T> NodeArena<T> {
    /// Create an empty arena with room for at least `minimum_capacity` nodes.
    ///
    /// The capacity is rounded up so the bitmap fills whole words.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity exceeds [`MAX_CAPACITY`].
    pub fn with_min_capacity(minimum_capacity: usize) -> Self {
        let capacity = match Self::capacity_for(minimum_capacity) {
            Ok(capacity) => capacity,
            Err(err) => panic!("{err}"),
        };
        let bitmap = SlotBitmap::with_bit_count(capacity);
        debug_assert_eq!(bitmap.bit_count(), capacity);
        tracing::trace!(minimum_capacity, capacity, "node arena created");
        Self {
            count: 0,
            head: None,
            bitmap,
            nodes: (0..capacity).map(|_| Node::vacant()).collect(),
        }
    }

    /// Slot capacity an arena built for `minimum_capacity` nodes would have.
    pub fn capacity_for(minimum_capacity: usize) -> Result<usize, ListError> {
        SlotBitmap::size_in_words(minimum_capacity)
            .checked_mul(BITS_PER_WORD)
            .filter(|&capacity| capacity <= MAX_CAPACITY)
            .ok_or(ListError::CapacityOverflow {
                requested: minimum_capacity,
                max: MAX_CAPACITY,
            })
    }

    /// Build an arena whose traversal order is the iteration order of `items`.
    ///
    /// Each item is chained after the previous one with
    /// [`insert_after`](Self::insert_after).
    pub fn from_traversal<I>(items: I, minimum_capacity: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut arena = Self::with_min_capacity(minimum_capacity);
        let mut cursor = None;
        for item in items {
            cursor = Some(arena.insert_after(item, cursor));
        }
        arena
    }

    /// Total number of node slots.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live nodes.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// The occupancy bitmap.
    pub fn bitmap(&self) -> &SlotBitmap {
        &self.bitmap
    }

    /// Whether `slot` is in range and occupied.
    pub fn has_node(&self, slot: Slot) -> bool {
        slot.index() < self.capacity() && self.bitmap.get(slot.index())
    }

    /// Element stored at `slot`, or `None` if the slot is vacant.
    pub fn get(&self, slot: Slot) -> Option<&T> {
        if !self.has_node(slot) {
            return None;
        }
        self.nodes[slot.index()].element.as_ref()
    }

    /// Mutable element stored at `slot`, or `None` if the slot is vacant.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        if !self.has_node(slot) {
            return None;
        }
        self.nodes[slot.index()].element.as_mut()
    }

    /// Element stored at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not hold a live node.
    pub fn node(&self, slot: Slot) -> &T {
        self.get(slot)
            .unwrap_or_else(|| panic!("{}", ListError::VacantSlot { slot }))
    }

    /// Traversal-first slot, if any.
    pub fn head(&self) -> Option<Slot> {
        self.live(self.head).map(|link| link.slot)
    }

    /// Live successor of `slot`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not hold a live node.
    pub fn next_of(&self, slot: Slot) -> Option<Slot> {
        if !self.has_node(slot) {
            panic!("{}", ListError::VacantSlot { slot });
        }
        self.live(self.nodes[slot.index()].next)
            .map(|link| link.slot)
    }

    /// Slot at 0-based traversal position `position`.
    pub fn slot_at(&self, position: usize) -> Option<Slot> {
        self.indices().nth(position)
    }

    /// Live slots in traversal order.
    pub fn indices(&self) -> Indices<'_, T> {
        Indices::new(self)
    }

    /// Elements in traversal order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Prepend `element`. Returns the slot it was placed in.
    ///
    /// # Panics
    ///
    /// Panics if the arena is full.
    pub fn insert(&mut self, element: T) -> Slot {
        let next = self.live(self.head);
        let slot = self.occupy(element, next);
        self.head = Some(self.link_to(slot));
        slot
    }

    /// Insert `element` immediately after the node at `after`, or prepend it
    /// when `after` is `None`. Returns the slot it was placed in.
    ///
    /// `after` is trusted to hold a live node.
    ///
    /// # Panics
    ///
    /// Panics if the arena is full.
    pub fn insert_after(&mut self, element: T, after: Option<Slot>) -> Slot {
        let Some(after) = after else {
            return self.insert(element);
        };
        debug_assert!(self.has_node(after), "insert after vacant slot {after}");
        let next = self.live(self.nodes[after.index()].next);
        let slot = self.occupy(element, next);
        self.nodes[after.index()].next = Some(self.link_to(slot));
        slot
    }

    /// Remove the node at `slot` and return its element.
    ///
    /// The slot keeps its identity when the node has a live successor: the
    /// successor is moved into it and the successor's slot is freed.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not hold a live node.
    pub fn remove(&mut self, slot: Slot) -> T {
        if !self.has_node(slot) {
            panic!("{}", ListError::VacantSlot { slot });
        }
        let at = slot.index();
        let (removed, freed) = match self.live(self.nodes[at].next) {
            Some(next) => {
                let successor = &mut self.nodes[next.slot.index()];
                let moved = successor.element.take();
                let moved_next = successor.next;
                let node = &mut self.nodes[at];
                node.next = moved_next;
                (std::mem::replace(&mut node.element, moved), next.slot)
            }
            None => (self.nodes[at].element.take(), slot),
        };
        self.release(freed);
        if self.count == 0 {
            self.head = None;
        }
        removed.unwrap_or_else(|| panic!("{}", ListError::VacantSlot { slot }))
    }

    /// Claim the lowest free slot for `element` with successor `next`.
    fn occupy(&mut self, element: T, next: Option<Link>) -> Slot {
        let hole = self.bitmap.find_hole().unwrap_or_else(|| {
            panic!(
                "{}",
                ArenaError::Full {
                    capacity: self.capacity()
                }
            )
        });
        self.bitmap.set(hole, true);
        let node = &mut self.nodes[hole];
        node.element = Some(element);
        node.next = next;
        self.count += 1;
        Slot(hole as u32)
    }

    /// Free `slot`: clear its bit and invalidate links that point at it.
    fn release(&mut self, slot: Slot) {
        let node = &mut self.nodes[slot.index()];
        debug_assert!(node.element.is_none());
        node.next = None;
        node.generation = node.generation.wrapping_add(1);
        self.bitmap.set(slot.index(), false);
        self.count -= 1;
    }

    fn link_to(&self, slot: Slot) -> Link {
        Link::new(slot, self.nodes[slot.index()].generation)
    }

    fn live(&self, link: Option<Link>) -> Option<Link> {
        link.filter(|link| {
            self.has_node(link.slot) && self.nodes[link.slot.index()].generation == link.generation
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("capacity", &self.capacity())
            .field("count", &self.count)
            .field("head", &self.head())
            .field("elements", &DebugTraversal(self))
            .finish()
    }
}

struct DebugTraversal<'a, T>(&'a NodeArena<T>);

impl<T: fmt::Debug> fmt::Debug for DebugTraversal<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.indices().map(|slot| (slot.raw(), self.0.node(slot))))
            .finish()
    }
}
