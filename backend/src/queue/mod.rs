//! Waiting queues
//!
//! One [`PriorityQueue`] per specialty holds the patients waiting for a
//! server of that specialty, ordered by clinical priority.

pub mod priority;

pub use priority::{PriorityKey, PriorityQueue, QueueError, QueuedPatient};
