//! Workload builders shared by the strand benchmarks.

#![forbid(unsafe_code)]

use strand::LinkedList;
use strand_test_utils::{ListOp, OpStream};

/// A uniquely owned list holding `0..len`, first element `0`.
pub fn prefilled(len: u64) -> LinkedList<u64> {
    (0..len).collect()
}

/// Drive `list` through `steps` ops from a seeded [`OpStream`].
///
/// Returns the number of removals, so the work cannot be optimised away.
pub fn run_workload(list: &mut LinkedList<u64>, seed: u64, steps: usize, max_len: usize) -> usize {
    let mut stream = OpStream::new(seed, max_len);
    let mut removed = 0;
    for _ in 0..steps {
        match stream.next_op(list.len()) {
            ListOp::Insert(v) => list.insert(v),
            ListOp::InsertAfter(v, p) => list.insert_after(v, p),
            ListOp::Remove(p) => {
                list.remove(p);
                removed += 1;
            }
            ListOp::Fork => {}
        }
    }
    removed
}
