//! Errors reported by the adaptive priority queue

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// The ways a queue operation can be refused
///
/// A refused operation never changes the queue.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum QueueError {
    /// `dequeue` on a queue with no elements
    Empty,
    /// The value is not currently in the queue
    NotFound,
    /// `enqueue` of a value that is already in the queue
    AlreadyQueued,
}

impl Display for QueueError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            QueueError::Empty => f.write_str("the queue is empty"),
            QueueError::NotFound => f.write_str("value was not in the queue"),
            QueueError::AlreadyQueued => f.write_str("value is already in the queue"),
        }
    }
}

impl Error for QueueError {}
