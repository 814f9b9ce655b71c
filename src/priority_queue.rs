//! A priority queue supporting updates to the priority of elements that are
//! already queued, looked up by the element itself
//!
//! Implemented with a binary min-heap plus a map from each value to its slot in
//! the heap

use crate::error::QueueError;
use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::iter::FromIterator;

#[derive(Debug, Copy, Clone)]
struct Entry<P> {
    // index of the value in `locations`
    key: usize,
    priority: P,
}

/// A min-priority queue whose elements can be re-prioritized in place
///
/// Values are looked up by equality, so each value may be queued at most once
/// at a time. Smaller priorities come out first.
#[derive(Debug, Clone)]
pub struct AdaptivePriorityQueue<V, P> {
    heap: Vec<Entry<P>>,
    // semantically: Map<V, index into heap>
    locations: IndexMap<V, usize>,
}

#[inline]
fn parent(index: usize) -> usize {
    (index - 1) / 2
}
#[inline]
fn left(index: usize) -> usize {
    2 * index + 1
}
#[inline]
fn right(index: usize) -> usize {
    2 * index + 2
}

impl<V, P> Default for AdaptivePriorityQueue<V, P> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            locations: IndexMap::new(),
        }
    }
}

impl<V: Hash + Eq, P: Ord + Copy> AdaptivePriorityQueue<V, P> {
    /// Make a new, empty queue
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            locations: IndexMap::with_capacity(capacity),
        }
    }

    /// The number of elements in the queue
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locations.contains_key(value)
    }

    /// Add a value with the given priority
    ///
    /// Fails with [`QueueError::AlreadyQueued`] if the value is already in the
    /// queue; use [`update_priority`](Self::update_priority) for that.
    pub fn enqueue(&mut self, value: V, priority: P) -> Result<(), QueueError> {
        let slot = self.heap.len();
        let key = match self.locations.entry(value) {
            MapEntry::Occupied(_) => {
                log::debug!("rejected enqueue of a value that is already queued");
                return Err(QueueError::AlreadyQueued);
            }
            MapEntry::Vacant(entry) => {
                entry.insert(slot);
                slot
            }
        };
        self.heap.push(Entry { key, priority });

        let slot = self.bubble_up(slot);
        log::trace!("enqueued at slot {} of {}", slot, self.len());
        Ok(())
    }

    /// Remove and return the value with the lowest priority
    pub fn dequeue(&mut self) -> Result<V, QueueError> {
        self.dequeue_with_priority().map(|(value, _)| value)
    }

    /// Remove and return the value with the lowest priority, along with that
    /// priority
    pub fn dequeue_with_priority(&mut self) -> Result<(V, P), QueueError> {
        match self.remove_at(0) {
            Some(pair) => {
                log::trace!("dequeued, {} left", self.len());
                Ok(pair)
            }
            None => {
                log::debug!("rejected dequeue from an empty queue");
                Err(QueueError::Empty)
            }
        }
    }

    /// The value with the lowest priority, without removing it
    pub fn peek(&self) -> Option<(&V, P)> {
        let root = self.heap.first()?;
        let (value, _) = self.locations.get_index(root.key)?;
        Some((value, root.priority))
    }

    /// The current priority of `value`
    pub fn get_priority<Q>(&self, value: &Q) -> Result<P, QueueError>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.locations.get(value) {
            Some(&slot) => Ok(self.heap[slot].priority),
            None => Err(QueueError::NotFound),
        }
    }

    /// Change the priority of a queued value, moving it to its new place
    pub fn update_priority<Q>(&mut self, value: &Q, priority: P) -> Result<(), QueueError>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = match self.locations.get(value) {
            Some(&slot) => slot,
            None => {
                log::debug!("rejected priority update of a value not in the queue");
                return Err(QueueError::NotFound);
            }
        };

        self.heap[slot].priority = priority;
        let moved_to = self.fix(slot);
        log::trace!("updated priority, slot {} -> {}", slot, moved_to);
        Ok(())
    }

    /// Remove an arbitrary queued value, returning the priority it had
    pub fn remove<Q>(&mut self, value: &Q) -> Result<P, QueueError>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.locations.get(value).ok_or(QueueError::NotFound)?;
        let (_, priority) = self.remove_at(slot).ok_or(QueueError::NotFound)?;
        log::trace!("removed from slot {}, {} left", slot, self.len());
        Ok(priority)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.locations.clear();
    }

    /// Iterate over the queued values and their priorities, in no particular
    /// order
    pub fn iter(&self) -> impl Iterator<Item = (&V, P)> + '_ {
        self.locations
            .iter()
            .map(move |(value, &slot)| (value, self.heap[slot].priority))
    }

    /// Drain the queue into a vector sorted by ascending priority
    pub fn into_sorted_vec(mut self) -> Vec<(V, P)> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(pair) = self.remove_at(0) {
            sorted.push(pair);
        }
        sorted
    }

    /// Enqueue `value`, or overwrite its priority if it is already queued
    fn upsert(&mut self, value: V, priority: P) {
        match self.locations.get(&value) {
            Some(&slot) => {
                self.heap[slot].priority = priority;
                self.fix(slot);
            }
            None => {
                let slot = self.heap.len();
                self.locations.insert(value, slot);
                self.heap.push(Entry {
                    key: slot,
                    priority,
                });
                self.bubble_up(slot);
            }
        }
    }

    /// Take the entry at `slot` out of both the heap and the map
    fn remove_at(&mut self, slot: usize) -> Option<(V, P)> {
        if slot >= self.heap.len() {
            return None;
        }

        // the last entry fills the hole
        let removed = self.heap.swap_remove(slot);
        if slot < self.heap.len() {
            let key = self.heap[slot].key;
            self.set_slot(key, slot);
            self.fix(slot);
        }

        // the map does the same thing, so whatever value was last in the map
        // now lives at `removed.key`
        let (value, _) = self.locations.swap_remove_index(removed.key)?;
        if let Some((_, &moved_slot)) = self.locations.get_index(removed.key) {
            self.heap[moved_slot].key = removed.key;
        }

        debug_assert_eq!(self.heap.len(), self.locations.len());
        Some((value, removed.priority))
    }

    /// Restore heap order around `slot` after its priority changed
    ///
    /// Returns the slot the entry ended up in
    fn fix(&mut self, slot: usize) -> usize {
        let i = self.bubble_up(slot);
        if i == slot {
            self.bubble_down(slot)
        } else {
            i
        }
    }

    /// Rebuild heap order over the whole array, bottom up
    fn heapify(&mut self) {
        if self.len() >= 2 {
            for i in (0..=parent(self.len() - 1)).rev() {
                self.bubble_down(i);
            }
        }
    }

    #[inline]
    fn set_slot(&mut self, key: usize, slot: usize) {
        if let Some((_, s)) = self.locations.get_index_mut(key) {
            *s = slot;
        }
    }

    /// Swap two heap slots, keeping the map pointing at the right places
    ///
    /// Every move inside the heap goes through here.
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let (key_a, key_b) = (self.heap[a].key, self.heap[b].key);
        self.set_slot(key_a, a);
        self.set_slot(key_b, b);
    }

    /// restore heap properties at index `i` by moving it down the heap
    fn bubble_down(&mut self, mut i: usize) -> usize {
        let len = self.len();

        while left(i) < len {
            // ties go to the left child
            let mut child = left(i);
            if right(i) < len && self.heap[right(i)].priority < self.heap[child].priority {
                child = right(i);
            }

            if self.heap[child].priority < self.heap[i].priority {
                self.swap(i, child);
                i = child;
            } else {
                break;
            }
        }

        i
    }

    /// restore heap properties at index `i` by moving it up the heap
    fn bubble_up(&mut self, mut i: usize) -> usize {
        while i > 0 && self.heap[i].priority < self.heap[parent(i)].priority {
            self.swap(parent(i), i);
            i = parent(i);
        }

        i
    }
}

/// Later pairs overwrite the priority of an earlier pair with an equal value
impl<V: Hash + Eq, P: Ord + Copy> FromIterator<(V, P)> for AdaptivePriorityQueue<V, P> {
    fn from_iter<I: IntoIterator<Item = (V, P)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut this = Self::with_capacity(iter.size_hint().0);

        for (value, priority) in iter {
            let slot = this.heap.len();
            match this.locations.entry(value) {
                MapEntry::Occupied(entry) => this.heap[*entry.get()].priority = priority,
                MapEntry::Vacant(entry) => {
                    entry.insert(slot);
                    this.heap.push(Entry {
                        key: slot,
                        priority,
                    });
                }
            }
        }

        this.heapify();
        this
    }
}

/// Values already in the queue get the new priority
impl<V: Hash + Eq, P: Ord + Copy> Extend<(V, P)> for AdaptivePriorityQueue<V, P> {
    fn extend<I: IntoIterator<Item = (V, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.upsert(value, priority);
        }
    }
}
