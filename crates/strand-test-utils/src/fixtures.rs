//! Reusable element fixtures.
//!
//! - [`Tracked`]: a clonable element that counts how many instances are
//!   alive, for checking that arenas drop exactly the elements they own.
//! - [`scenario_ops`]: the prepend / fork / diverge / remove walkthrough.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::ListOp;

/// Shared live-instance counter for [`Tracked`] values.
#[derive(Clone, Debug, Default)]
pub struct LiveCounter(Arc<AtomicUsize>);

impl LiveCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`Tracked`] values created from this counter and not yet
    /// dropped.
    pub fn live(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn track(&self, value: i32) -> Tracked {
        self.0.fetch_add(1, Ordering::SeqCst);
        Tracked {
            value,
            counter: self.clone(),
        }
    }
}

/// Element that registers itself with a [`LiveCounter`] while alive.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    counter: LiveCounter,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counter.track(self.value)
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counter.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Ops for the basic walkthrough: `[10]`, `[20, 10]`, fork, `[30, 20, 10]`
/// on the fork.
pub fn scenario_ops() -> Vec<ListOp<i32>> {
    vec![
        ListOp::Insert(10),
        ListOp::Insert(20),
        ListOp::Fork,
        ListOp::Insert(30),
    ]
}
