//! Test utilities for strand development.
//!
//! Provides a `Vec`-backed [`ModelList`] that mirrors the list's logical
//! behaviour, a [`ListOp`] vocabulary for scripted operation sequences, a
//! seeded [`OpStream`] generator for reproducible workloads, and proptest
//! strategies over the same vocabulary.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use proptest::prelude::*;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One list mutation, addressed by logical position.
///
/// Positions are raw picks; [`ListOp::resolve`] folds them into range for a
/// list of a given length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListOp<T> {
    /// Prepend.
    Insert(T),
    /// Insert after the element at the position.
    InsertAfter(T, usize),
    /// Remove the element at the position.
    Remove(usize),
    /// Clone the handle and continue on the copy. The previous handle is
    /// kept alive so the next mutation hits a shared arena.
    Fork,
}

impl<T> ListOp<T> {
    /// Bring the position of this op into range for a list of `len`
    /// elements. Returns `None` when the op cannot apply (positional op on an
    /// empty list).
    pub fn resolve(self, len: usize) -> Option<Self> {
        match self {
            Self::InsertAfter(v, p) if len > 0 => Some(Self::InsertAfter(v, p % len)),
            Self::Remove(p) if len > 0 => Some(Self::Remove(p % len)),
            Self::InsertAfter(..) | Self::Remove(_) => None,
            op => Some(op),
        }
    }
}

/// Reference singly-linked-list model backed by a `Vec`.
///
/// Index 0 is the traversal-first element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelList<T> {
    items: Vec<T>,
}

impl<T: Clone> ModelList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, element: T) {
        self.items.insert(0, element);
    }

    pub fn insert_after(&mut self, element: T, position: usize) {
        self.items.insert(position + 1, element);
    }

    pub fn remove(&mut self, position: usize) -> T {
        self.items.remove(position)
    }

    /// Apply an already-resolved op. `Fork` is a no-op on the model.
    /// Returns the removed element for `Remove`.
    pub fn apply(&mut self, op: &ListOp<T>) -> Option<T> {
        match op {
            ListOp::Insert(v) => self.insert(v.clone()),
            ListOp::InsertAfter(v, p) => self.insert_after(v.clone(), *p),
            ListOp::Remove(p) => return Some(self.remove(*p)),
            ListOp::Fork => {}
        }
        None
    }

    /// Elements in traversal order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

/// Deterministic stream of list operations.
///
/// Uses ChaCha8 so workloads are identical across platforms for a given
/// seed. Removal probability rises with length to keep lists bounded.
pub struct OpStream {
    rng: ChaCha8Rng,
    next_value: u64,
    max_len: usize,
}

impl OpStream {
    pub fn new(seed: u64, max_len: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_value: 0,
            max_len: max_len.max(1),
        }
    }

    /// Next op, already resolved for a list of `len` elements.
    pub fn next_op(&mut self, len: usize) -> ListOp<u64> {
        let roll = self.rng.next_u64();
        let pick = (self.rng.next_u64() % (len.max(1) as u64)) as usize;
        let value = self.next_value;
        self.next_value += 1;

        if len > 0 && (roll % self.max_len as u64) < len as u64 {
            return ListOp::Remove(pick);
        }
        match roll % 3 {
            0 => ListOp::Insert(value),
            _ if len == 0 => ListOp::Insert(value),
            _ => ListOp::InsertAfter(value, pick),
        }
    }
}

/// Proptest strategy over unresolved ops. `Fork` is included only when
/// `with_forks` is set.
pub fn op_strategy(with_forks: bool) -> BoxedStrategy<ListOp<i32>> {
    let base = prop_oneof![
        3 => any::<i32>().prop_map(ListOp::Insert),
        3 => (any::<i32>(), any::<usize>()).prop_map(|(v, p)| ListOp::InsertAfter(v, p)),
        2 => any::<usize>().prop_map(ListOp::Remove),
    ];
    if with_forks {
        prop_oneof![8 => base, 1 => Just(ListOp::Fork)].boxed()
    } else {
        base.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_prepends_and_splices() {
        let mut model = ModelList::new();
        model.insert(10);
        model.insert(20);
        model.insert_after(15, 0);
        assert_eq!(model.as_slice(), &[20, 15, 10]);
        assert_eq!(model.remove(1), 15);
        assert_eq!(model.as_slice(), &[20, 10]);
    }

    #[test]
    fn resolve_folds_positions_into_range() {
        assert_eq!(ListOp::<u8>::Remove(7).resolve(3), Some(ListOp::Remove(1)));
        assert_eq!(ListOp::<u8>::Remove(7).resolve(0), None);
        assert_eq!(
            ListOp::InsertAfter(1u8, 5).resolve(5),
            Some(ListOp::InsertAfter(1, 0))
        );
        assert_eq!(ListOp::Insert(1u8).resolve(0), Some(ListOp::Insert(1)));
    }

    #[test]
    fn op_stream_is_reproducible() {
        let run = |seed| {
            let mut stream = OpStream::new(seed, 16);
            let mut model = ModelList::new();
            for _ in 0..200 {
                let op = stream.next_op(model.len());
                model.apply(&op);
            }
            model
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn op_stream_respects_length_bound() {
        let mut stream = OpStream::new(1, 8);
        let mut model = ModelList::new();
        for _ in 0..1_000 {
            let op = stream.next_op(model.len());
            model.apply(&op);
            assert!(model.len() <= 8);
        }
    }
}
