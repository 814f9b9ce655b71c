pub mod error;
pub mod priority_queue;
pub mod script;

pub use self::error::QueueError;
pub use self::priority_queue::AdaptivePriorityQueue;
