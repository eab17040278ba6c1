//! Copy-on-write behaviour observed through list handles.

use strand::{LinkedList, ListConfig};
use strand_test_utils::fixtures::{scenario_ops, LiveCounter};
use strand_test_utils::ListOp;

fn contents<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

#[test]
fn walkthrough_scenario() {
    let mut handles = vec![LinkedList::new()];
    for op in scenario_ops() {
        let current = handles.last_mut().unwrap();
        match op {
            ListOp::Insert(v) => current.insert(v),
            ListOp::Fork => {
                let fork = current.clone();
                handles.push(fork);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
    let [mut original, fork] = <[LinkedList<i32>; 2]>::try_from(handles).unwrap();
    assert_eq!(contents(&fork), vec![30, 20, 10]);
    assert_eq!(contents(&original), vec![20, 10]);

    assert_eq!(original.remove(0), 20);
    assert_eq!(contents(&original), vec![10]);
    assert_eq!(contents(&fork), vec![30, 20, 10]);
}

#[test]
fn clone_is_constant_time_sharing() {
    let list: LinkedList<i32> = (0..1_000).collect();
    let copy = list.clone();
    assert!(LinkedList::ptr_eq(&list, &copy));
    assert_eq!(list.storage_ptr(), copy.storage_ptr());
    assert!(!list.is_unique());
    drop(copy);
    assert!(list.is_unique());
}

#[test]
fn mutating_original_leaves_copy_untouched() {
    let mut list: LinkedList<i32> = [1, 2, 3].into_iter().collect();
    let copy = list.clone();
    list.insert_after(9, 1);
    list.remove(0);
    assert_eq!(contents(&list), vec![2, 9, 3]);
    assert_eq!(contents(&copy), vec![1, 2, 3]);
    assert_eq!(copy.len(), 3);
}

#[test]
fn sole_owner_with_room_does_not_reallocate() {
    let mut list = LinkedList::with_config(ListConfig::new(128)).unwrap();
    let ptr = list.storage_ptr();
    for i in 0..100 {
        list.insert(i);
    }
    for i in 0..20 {
        list.insert_after(-i, i as usize);
    }
    for _ in 0..50 {
        list.remove(3);
    }
    assert_eq!(list.storage_ptr(), ptr);
    assert_eq!(list.capacity(), 128);
    assert_eq!(list.len(), 70);
}

#[test]
fn rebuild_sizes_arena_to_required_count() {
    let list: LinkedList<i32> = (0..100).collect();
    let mut copy = list.clone();
    copy.remove(0);
    // 99 slots required, rounded to two bitmap words.
    assert_eq!(copy.capacity(), 128);
    assert_eq!(copy.len(), 99);
}

#[test]
fn elements_dropped_with_last_handle() {
    let counter = LiveCounter::new();
    let list: LinkedList<_> = (0..5).map(|i| counter.track(i)).collect();
    assert_eq!(counter.live(), 5);

    let mut copy = list.clone();
    assert_eq!(counter.live(), 5, "sharing clones no elements");

    copy.insert(counter.track(99));
    assert_eq!(counter.live(), 11, "rebuild cloned the five shared elements");

    let removed = copy.remove(0);
    assert_eq!(removed.value, 99);
    drop(removed);
    assert_eq!(counter.live(), 10);

    drop(list);
    assert_eq!(counter.live(), 5);
    drop(copy);
    assert_eq!(counter.live(), 0);
}

#[test]
fn stale_successor_is_not_followed_after_slot_reuse() {
    let mut list = LinkedList::new();
    list.insert('a');
    list.insert('b');
    // Removing the tail leaves 'b' holding a link to the freed slot.
    assert_eq!(list.remove(1), 'a');
    // The prepend reuses that slot.
    list.insert('c');
    assert_eq!(contents(&list), vec!['c', 'b']);
    list.insert_after('d', 1);
    assert_eq!(contents(&list), vec!['c', 'b', 'd']);
    assert_eq!(list.arena().bitmap().count_ones(), 3);
}

#[test]
fn empty_lists_compare_equal_regardless_of_capacity() {
    assert_eq!(LinkedList::<i32>::new(), LinkedList::with_capacity(0));
    assert_eq!(format!("{:?}", LinkedList::<i32>::default()), "[]");
}
