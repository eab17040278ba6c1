//! Value-semantic list handle with copy-on-write arenas.
//!
//! [`LinkedList`] holds an `Arc` to one [`NodeArena`]. Cloning a list clones
//! the `Arc`, so copies share storage until one of them is mutated. Every
//! mutation goes through a single gate:
//!
//! - **In place**: the handle is the arena's only owner and the arena has
//!   room for the result. The edit is applied directly, with no allocation.
//! - **Rebuild**: otherwise a new arena sized for the result is filled with
//!   clones of the current elements in traversal order, the edit is applied
//!   to it, and the handle switches to the new arena. Other handles keep the
//!   old one.
//!
//! Positions passed to [`insert_after`](LinkedList::insert_after) and
//! [`remove`](LinkedList::remove) are 0-based offsets into traversal order.
//! The `*_index` variants take raw [`Slot`] indices from the sequence
//! protocol ([`start_index`](LinkedList::start_index),
//! [`index_after`](LinkedList::index_after)).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::Arc;

use crate::arena::NodeArena;
use crate::config::ListConfig;
use crate::error::ListError;
use crate::iter::{Indices, Iter};
use crate::slot::Slot;

/// Singly linked list stored in a single shared arena.
pub struct LinkedList<T> {
    arena: Arc<NodeArena<T>>,
}

impl<T> LinkedList<T> {
    /// Create an empty list with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(ListConfig::DEFAULT_INITIAL_CAPACITY)
    }

    /// Create an empty list with room for at least `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is larger than an arena can address.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arc::new(NodeArena::with_min_capacity(capacity)),
        }
    }

    /// Create an empty list from a validated config.
    pub fn with_config(config: ListConfig) -> Result<Self, ListError> {
        config.validate()?;
        Ok(Self::with_capacity(config.initial_capacity))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.arena.count()
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot capacity of the current arena.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Read-only view of the backing arena.
    pub fn arena(&self) -> &NodeArena<T> {
        &self.arena
    }

    /// Whether no other handle shares this list's arena.
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.arena) == 1
    }

    /// Whether two handles share one arena.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.arena, &other.arena)
    }

    /// Address of the backing arena. Stays the same across in-place edits.
    pub fn storage_ptr(&self) -> *const () {
        Arc::as_ptr(&self.arena).cast()
    }

    /// Index of the first element, or [`end_index`](Self::end_index) when
    /// the list is empty.
    pub fn start_index(&self) -> Slot {
        self.arena.head().unwrap_or(Slot::END)
    }

    /// The past-the-end sentinel.
    pub fn end_index(&self) -> Slot {
        Slot::END
    }

    /// Index following `index` in traversal order, or
    /// [`end_index`](Self::end_index) after the last element.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not refer to a live element.
    pub fn index_after(&self, index: Slot) -> Slot {
        self.arena.next_of(index).unwrap_or(Slot::END)
    }

    /// Whether `index` refers to a live element.
    pub fn contains_index(&self, index: Slot) -> bool {
        self.arena.has_node(index)
    }

    /// Element at raw `index`, if live.
    pub fn get(&self, index: Slot) -> Option<&T> {
        self.arena.get(index)
    }

    /// First element in traversal order.
    pub fn first(&self) -> Option<&T> {
        self.arena.head().map(|slot| self.arena.node(slot))
    }

    /// Element at logical `position`.
    pub fn get_at(&self, position: usize) -> Option<&T> {
        self.iter().nth(position)
    }

    /// Raw index of the element at logical `position`.
    pub fn position_to_index(&self, position: usize) -> Option<Slot> {
        self.arena.slot_at(position)
    }

    /// Elements in traversal order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.arena.iter()
    }

    /// Raw indices in traversal order.
    pub fn indices(&self) -> Indices<'_, T> {
        self.arena.indices()
    }

    fn out_of_bounds(&self, position: usize) -> ListError {
        ListError::PositionOutOfBounds {
            position,
            len: self.len(),
        }
    }
}

impl<T: Clone> LinkedList<T> {
    /// Prepend `element`; it becomes the first element.
    pub fn insert(&mut self, element: T) {
        let required = self.len() + 1;
        self.mutate(required, None, |arena, _| {
            arena.insert(element);
        });
    }

    /// Insert `element` right after the element at logical `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()`.
    pub fn insert_after(&mut self, element: T, position: usize) {
        if let Err(err) = self.try_insert_after(element, position) {
            panic!("{err}");
        }
    }

    /// Checked [`insert_after`](Self::insert_after).
    pub fn try_insert_after(&mut self, element: T, position: usize) -> Result<(), ListError> {
        let index = self
            .position_to_index(position)
            .ok_or_else(|| self.out_of_bounds(position))?;
        self.try_insert_after_index(element, index)
    }

    /// Remove and return the element at logical `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()`.
    pub fn remove(&mut self, position: usize) -> T {
        self.try_remove(position).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Checked [`remove`](Self::remove).
    pub fn try_remove(&mut self, position: usize) -> Result<T, ListError> {
        let index = self
            .position_to_index(position)
            .ok_or_else(|| self.out_of_bounds(position))?;
        self.try_remove_at_index(index)
    }

    /// Insert `element` right after the element at raw `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not refer to a live element.
    pub fn insert_after_index(&mut self, element: T, index: Slot) {
        if let Err(err) = self.try_insert_after_index(element, index) {
            panic!("{err}");
        }
    }

    /// Checked [`insert_after_index`](Self::insert_after_index).
    pub fn try_insert_after_index(&mut self, element: T, index: Slot) -> Result<(), ListError> {
        if !self.contains_index(index) {
            return Err(ListError::VacantSlot { slot: index });
        }
        let required = self.len() + 1;
        self.mutate(required, Some(index), |arena, at| {
            arena.insert_after(element, at);
        });
        Ok(())
    }

    /// Remove and return the element at raw `index`.
    ///
    /// When the element has a successor, the successor takes over `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not refer to a live element.
    pub fn remove_at_index(&mut self, index: Slot) -> T {
        self.try_remove_at_index(index)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Checked [`remove_at_index`](Self::remove_at_index).
    pub fn try_remove_at_index(&mut self, index: Slot) -> Result<T, ListError> {
        if !self.contains_index(index) {
            return Err(ListError::VacantSlot { slot: index });
        }
        let required = self.len();
        Ok(self.mutate(required, Some(index), |arena, at| {
            arena.remove(at.unwrap_or(Slot::END))
        }))
    }

    /// Run `edit` against an arena this handle owns exclusively and that
    /// holds at least `required` slots, rebuilding one if needed.
    ///
    /// `target` is a live slot of the current arena; `edit` receives the
    /// slot holding the same element in the arena it is given.
    fn mutate<R>(
        &mut self,
        required: usize,
        target: Option<Slot>,
        edit: impl FnOnce(&mut NodeArena<T>, Option<Slot>) -> R,
    ) -> R {
        if let Some(arena) = self.unique_arena(required) {
            return edit(arena, target);
        }
        let (mut arena, mapped) = self.rebuild(required, target);
        let out = edit(&mut arena, mapped);
        self.arena = Arc::new(arena);
        out
    }

    fn unique_arena(&mut self, required: usize) -> Option<&mut NodeArena<T>> {
        if self.arena.capacity() < required {
            return None;
        }
        Arc::get_mut(&mut self.arena)
    }

    /// Copy the current traversal into a fresh arena of `required` slots.
    /// Returns the new arena and the new slot of `track`.
    fn rebuild(&self, required: usize, track: Option<Slot>) -> (NodeArena<T>, Option<Slot>) {
        tracing::trace!(
            len = self.len(),
            old_capacity = self.capacity(),
            required,
            shared = !self.is_unique(),
            "rebuilding list arena"
        );
        let mut arena = NodeArena::with_min_capacity(required);
        let mut cursor = None;
        let mut mapped = None;
        for index in self.indices() {
            let slot = arena.insert_after(self.arena.node(index).clone(), cursor);
            if Some(index) == track {
                mapped = Some(slot);
            }
            cursor = Some(slot);
        }
        (arena, mapped)
    }
}

impl<T> Clone for LinkedList<T> {
    /// Share the arena with the new handle. O(1).
    fn clone(&self) -> Self {
        Self {
            arena: Arc::clone(&self.arena),
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Slot> for LinkedList<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` does not refer to a live element.
    fn index(&self, index: Slot) -> &T {
        self.arena.node(index)
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for element in self {
            element.hash(state);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    /// The first item yielded becomes the first element.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let len = items.len();
        Self {
            arena: Arc::new(NodeArena::from_traversal(items, len)),
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
