//! # Queue Tests
//!
//! The ready and blocked queues are strict FIFOs over process handles.

use pretty_assertions::assert_eq;
use rrsim_core::process::ProcessTable;
use rrsim_core::sched::ProcessQueue;

use crate::common::harness::process;

#[test]
fn test_fifo_order() {
    let mut table = ProcessTable::new();
    let handles: Vec<_> = (1..=4).map(|pid| table.insert(process(pid, "I"))).collect();

    let mut queue = ProcessQueue::new();
    for &h in &handles {
        queue.enqueue(h);
    }
    assert_eq!(queue.len(), 4);
    assert_eq!(queue.front(), Some(handles[0]));
    assert_eq!(queue.iter().collect::<Vec<_>>(), handles);

    let drained: Vec<_> = std::iter::from_fn(|| queue.dequeue()).collect();
    assert_eq!(drained, handles);
    assert!(queue.is_empty());
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn test_requeued_handle_goes_to_back() {
    let mut table = ProcessTable::new();
    let a = table.insert(process(1, "I"));
    let b = table.insert(process(2, "I"));
    let c = table.insert(process(3, "I"));

    let mut queue = ProcessQueue::new();
    queue.enqueue(a);
    queue.enqueue(b);
    queue.enqueue(c);

    let head = queue.dequeue().unwrap();
    queue.enqueue(head);
    assert_eq!(queue.iter().collect::<Vec<_>>(), vec![b, c, a]);
}
