//! Priority queue of waiting patients
//!
//! Ordered by an explicit composite key:
//!
//! ```text
//! (severity ascending, arrival_time ascending, sequence ascending)
//! ```
//!
//! `sequence` is a per-queue insertion counter. It makes the order strict
//! (no two entries ever compare equal), so extraction order is fully
//! deterministic even when floating-point arrival times collide.
//!
//! # Complexity
//!
//! - `insert`: O(log n)
//! - `extract_min`: O(log n)
//! - `len`: O(1)
//! - `peek_snapshot`: O(n log n), sorts a copy and never touches the heap

use crate::core::time::SimTime;
use crate::models::patient::Patient;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QueueError {
    #[error("Cannot extract from an empty queue")]
    Empty,
}

/// Strict total order over waiting patients. Smaller = served first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriorityKey {
    pub severity: u8,
    pub arrival_time: SimTime,
    pub sequence: u64,
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity
            .cmp(&other.severity)
            .then_with(|| self.arrival_time.total_cmp(&other.arrival_time))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

/// Heap entry. Compares by key only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedPatient {
    pub key: PriorityKey,
    pub patient: Patient,
}

impl Ord for QueuedPatient {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for QueuedPatient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedPatient {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for QueuedPatient {}

/// Min-priority queue of patients
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{Patient, PriorityQueue};
///
/// let mut queue = PriorityQueue::new();
/// let mild = Patient::new(1, "Mild".to_string(), 4, 0.0);
/// let severe = Patient::new(2, "Severe".to_string(), 1, 3.0);
///
/// queue.insert(mild, 0.0);
/// queue.insert(severe, 3.0);
///
/// assert_eq!(queue.extract_min().unwrap().id(), 2);
/// assert_eq!(queue.extract_min().unwrap().id(), 1);
/// assert!(queue.extract_min().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Reverse<QueuedPatient>>,
    next_sequence: u64,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Rebuild a queue from checkpointed entries, keeping their original keys
    ///
    /// The sequence counter resumes past the largest restored sequence so new
    /// insertions still sort after every restored tie.
    pub fn from_entries(entries: Vec<QueuedPatient>) -> Self {
        let next_sequence = entries
            .iter()
            .map(|e| e.key.sequence + 1)
            .max()
            .unwrap_or(0);
        Self {
            heap: entries.into_iter().map(Reverse).collect(),
            next_sequence,
        }
    }

    /// Push a patient, assigning the next insertion sequence
    ///
    /// Returns the key the patient was filed under.
    pub fn insert(&mut self, patient: Patient, arrival_time: SimTime) -> PriorityKey {
        let key = PriorityKey {
            severity: patient.severity(),
            arrival_time,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(Reverse(QueuedPatient { key, patient }));
        key
    }

    /// Remove and return the highest-priority patient
    pub fn extract_min(&mut self) -> Result<Patient, QueueError> {
        self.heap
            .pop()
            .map(|Reverse(entry)| entry.patient)
            .ok_or(QueueError::Empty)
    }

    /// Patient `extract_min` would return next, left in place
    pub fn peek(&self) -> Option<&Patient> {
        self.heap.peek().map(|Reverse(entry)| &entry.patient)
    }

    /// Key of the patient `extract_min` would return next
    pub fn peek_key(&self) -> Option<PriorityKey> {
        self.heap.peek().map(|Reverse(entry)| entry.key)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Sorted read-only view of every waiting patient, in extraction order
    pub fn peek_snapshot(&self) -> Vec<(&Patient, PriorityKey)> {
        let mut view: Vec<(&Patient, PriorityKey)> = self
            .heap
            .iter()
            .map(|Reverse(entry)| (&entry.patient, entry.key))
            .collect();
        view.sort_by(|a, b| a.1.cmp(&b.1));
        view
    }

    /// Owned copy of every entry in extraction order (for checkpoints)
    pub fn entries(&self) -> Vec<QueuedPatient> {
        let mut entries: Vec<QueuedPatient> =
            self.heap.iter().map(|Reverse(entry)| entry.clone()).collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(severity: u8, arrival_time: SimTime, sequence: u64) -> PriorityKey {
        PriorityKey {
            severity,
            arrival_time,
            sequence,
        }
    }

    #[test]
    fn test_key_orders_severity_first() {
        assert!(key(1, 50.0, 9) < key(2, 0.0, 0));
    }

    #[test]
    fn test_key_orders_arrival_second() {
        assert!(key(3, 1.0, 9) < key(3, 2.0, 0));
    }

    #[test]
    fn test_key_orders_sequence_last() {
        assert!(key(3, 1.0, 0) < key(3, 1.0, 1));
        assert_ne!(key(3, 1.0, 0), key(3, 1.0, 1));
    }

    #[test]
    fn test_from_entries_resumes_sequence() {
        let mut original = PriorityQueue::new();
        for id in 0..3 {
            original.insert(Patient::new(id, format!("P{}", id), 2, 0.0), 0.0);
        }

        let mut restored = PriorityQueue::from_entries(original.entries());
        let key = restored.insert(Patient::new(9, "Late".to_string(), 2, 0.0), 0.0);
        assert_eq!(key.sequence, 3);

        let order: Vec<u64> = std::iter::from_fn(|| restored.extract_min().ok())
            .map(|p| p.id())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 9]);
    }

    #[test]
    fn test_peek_snapshot_does_not_mutate() {
        let mut queue = PriorityQueue::new();
        queue.insert(Patient::new(1, "A".to_string(), 5, 0.0), 0.0);
        queue.insert(Patient::new(2, "B".to_string(), 1, 0.0), 0.0);

        let view = queue.peek_snapshot();
        assert_eq!(view[0].0.id(), 2);
        assert_eq!(view[1].0.id(), 1);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_peek_matches_next_extraction() {
        let mut queue = PriorityQueue::new();
        assert!(queue.peek().is_none());
        queue.insert(Patient::new(1, "A".to_string(), 4, 0.0), 0.0);
        queue.insert(Patient::new(2, "B".to_string(), 2, 6.0), 6.0);

        assert_eq!(queue.peek().map(|p| p.id()), Some(2));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.extract_min().unwrap().id(), 2);
    }
}
