//! End-to-end behaviour of the adaptive priority queue through its public API

use adaptive_pq::{AdaptivePriorityQueue, QueueError};
use proptest::prelude::*;

#[test]
fn lower_priority_comes_out_first() {
    let mut pq = AdaptivePriorityQueue::new();
    pq.enqueue("enqueued first", 1).unwrap();
    pq.enqueue("enqueued second", 0).unwrap();

    assert_eq!(pq.len(), 2);
    assert_eq!(pq.dequeue(), Ok("enqueued second"));
    assert_eq!(pq.dequeue(), Ok("enqueued first"));
}

#[test]
fn updates_reverse_the_order() {
    let mut pq = AdaptivePriorityQueue::new();
    pq.enqueue("a", 0).unwrap();
    pq.enqueue("b", 2).unwrap();
    pq.enqueue("c", 4).unwrap();
    pq.enqueue("d", 6).unwrap();

    assert_eq!(pq.update_priority("d", 1), Ok(()));
    assert_eq!(pq.update_priority("c", 3), Ok(()));
    assert_eq!(pq.update_priority("b", 5), Ok(()));
    assert_eq!(pq.update_priority("a", 7), Ok(()));

    for (i, &x) in ["d", "c", "b", "a"].iter().enumerate() {
        assert_eq!(pq.dequeue(), Ok(x), "the {}th item", i);
    }
}

#[test]
fn dequeue_on_empty_leaves_it_empty() {
    let mut pq: AdaptivePriorityQueue<&str, i32> = AdaptivePriorityQueue::new();
    assert_eq!(pq.dequeue(), Err(QueueError::Empty));
    assert_eq!(pq.len(), 0);
    assert!(pq.is_empty());
}

#[test]
fn lookups_of_unknown_values_fail() {
    let mut pq = AdaptivePriorityQueue::new();
    pq.enqueue(String::from("here"), 3).unwrap();

    assert_eq!(pq.get_priority("missing"), Err(QueueError::NotFound));
    assert_eq!(pq.update_priority("missing", 0), Err(QueueError::NotFound));
    assert_eq!(pq.remove("missing"), Err(QueueError::NotFound));

    // still usable afterwards
    assert_eq!(pq.get_priority("here"), Ok(3));
    assert_eq!(pq.dequeue().as_deref(), Ok("here"));
}

#[test]
fn dequeued_values_can_come_back() {
    let mut pq = AdaptivePriorityQueue::new();
    pq.enqueue(7u32, 10).unwrap();
    assert_eq!(pq.dequeue(), Ok(7));
    assert_eq!(pq.get_priority(&7), Err(QueueError::NotFound));

    pq.enqueue(7, 2).unwrap();
    assert_eq!(pq.get_priority(&7), Ok(2));
}

#[test]
fn equal_priorities_all_come_out() {
    let mut pq = AdaptivePriorityQueue::new();
    for v in 0..20 {
        pq.enqueue(v, 5).unwrap();
    }
    let mut out: Vec<_> = (0..20).map(|_| pq.dequeue().unwrap()).collect();
    out.sort();
    assert_eq!(out, (0..20).collect::<Vec<_>>());
}

proptest! {
    #[test]
    fn priorities_round_trip(pairs in prop::collection::hash_map(any::<u32>(), any::<i64>(), 1..64), bump in any::<i64>()) {
        let mut pq = AdaptivePriorityQueue::new();
        for (&v, &p) in &pairs {
            pq.enqueue(v, p).unwrap();
            prop_assert_eq!(pq.get_priority(&v), Ok(p));
        }

        let len = pq.len();
        for &v in pairs.keys() {
            pq.update_priority(&v, bump).unwrap();
            prop_assert_eq!(pq.get_priority(&v), Ok(bump));
        }
        prop_assert_eq!(pq.len(), len);
    }

    #[test]
    fn dequeue_order_is_non_decreasing(
        pairs in prop::collection::hash_map(any::<u16>(), -1000i32..1000, 0..128),
        updates in prop::collection::vec((any::<u16>(), -1000i32..1000), 0..64),
    ) {
        let mut pq = AdaptivePriorityQueue::new();
        for (&v, &p) in &pairs {
            pq.enqueue(v, p).unwrap();
        }
        for (v, p) in updates {
            let _ = pq.update_priority(&v, p);
        }

        let mut last = None;
        let mut count = 0;
        loop {
            let peeked = match pq.peek() {
                Some((_, p)) => p,
                None => break,
            };
            let before = pq.len();
            let (_, p) = pq.dequeue_with_priority().unwrap();
            prop_assert_eq!(p, peeked);
            prop_assert_eq!(pq.len(), before - 1);
            if let Some(last) = last {
                prop_assert!(last <= p);
            }
            last = Some(p);
            count += 1;
        }
        prop_assert_eq!(count, pairs.len());
    }
}
