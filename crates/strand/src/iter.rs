//! Traversal iterators over a [`NodeArena`].

use std::iter::FusedIterator;

use crate::arena::NodeArena;
use crate::slot::Slot;

/// Live slots of an arena in traversal order.
pub struct Indices<'a, T> {
    arena: &'a NodeArena<T>,
    next: Option<Slot>,
    /// Nodes not yet yielded. Bounds the walk even if a link is corrupt.
    remaining: usize,
}

impl<'a, T> Indices<'a, T> {
    pub(crate) fn new(arena: &'a NodeArena<T>) -> Self {
        Self {
            arena,
            next: arena.head(),
            remaining: arena.count(),
        }
    }
}

impl<T> Clone for Indices<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T> Iterator for Indices<'_, T> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.next?;
        self.next = self.arena.next_of(slot);
        self.remaining -= 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Indices<'_, T> {}

impl<T> FusedIterator for Indices<'_, T> {}

/// Elements of an arena in traversal order.
pub struct Iter<'a, T> {
    indices: Indices<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a NodeArena<T>) -> Self {
        Self {
            indices: Indices::new(arena),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            indices: self.indices.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let arena = self.indices.arena;
        self.indices.next().map(|slot| arena.node(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
