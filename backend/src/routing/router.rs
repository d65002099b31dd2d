//! Admission router
//!
//! Owns the specialty → queue table. The table is built once, covers every
//! [`Specialty`], and its keys never change afterwards; only queue contents do.
//!
//! The router is the single authority over a patient's specialty: if the
//! generator left it unset, `admit` resolves it with the triage rule and
//! persists it on the patient exactly once.

use crate::models::patient::{Patient, PatientError, PatientId};
use crate::models::specialty::Specialty;
use crate::queue::{PriorityKey, PriorityQueue};
use crate::rng::RngManager;
use crate::routing::triage::triage_specialty;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RoutingError {
    #[error("No queue configured for specialty {0}")]
    UnknownSpecialty(Specialty),

    #[error(transparent)]
    Patient(#[from] PatientError),
}

/// Outcome of a successful admission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Admission {
    pub patient_id: PatientId,
    pub specialty: Specialty,
    pub key: PriorityKey,
    /// True if the specialty was inferred from severity
    pub triaged: bool,
}

/// Per-specialty waiting queues
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{AdmissionRouter, Patient, RngManager, Specialty};
///
/// let mut router = AdmissionRouter::new();
/// let mut rng = RngManager::new(42);
///
/// let admission = router
///     .admit(Patient::new(1, "Kit Lane".to_string(), 1, 0.0), &mut rng)
///     .unwrap();
///
/// assert_eq!(admission.specialty, Specialty::Emergency);
/// assert!(admission.triaged);
/// assert_eq!(router.queue(Specialty::Emergency).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AdmissionRouter {
    queues: BTreeMap<Specialty, PriorityQueue>,
}

impl AdmissionRouter {
    /// One empty queue per specialty
    pub fn new() -> Self {
        Self {
            queues: Specialty::ALL
                .iter()
                .map(|&s| (s, PriorityQueue::new()))
                .collect(),
        }
    }

    /// Build from pre-filled queues (checkpoint restore)
    ///
    /// Fails if any specialty is missing a queue.
    pub fn from_queues(queues: BTreeMap<Specialty, PriorityQueue>) -> Result<Self, RoutingError> {
        let router = Self { queues };
        router.validate()?;
        Ok(router)
    }

    /// Check that every specialty has a queue
    pub fn validate(&self) -> Result<(), RoutingError> {
        match Specialty::ALL.iter().find(|s| !self.queues.contains_key(s)) {
            Some(&missing) => Err(RoutingError::UnknownSpecialty(missing)),
            None => Ok(()),
        }
    }

    /// Resolve the patient's specialty if needed and file them in its queue
    pub fn admit(
        &mut self,
        mut patient: Patient,
        rng: &mut RngManager,
    ) -> Result<Admission, RoutingError> {
        let (specialty, triaged) = match patient.specialty() {
            Some(specialty) => (specialty, false),
            None => (triage_specialty(patient.severity(), rng), true),
        };

        let queue = self
            .queues
            .get_mut(&specialty)
            .ok_or(RoutingError::UnknownSpecialty(specialty))?;

        if triaged {
            patient.resolve_specialty(specialty)?;
        }

        let patient_id = patient.id();
        let arrival_time = patient.arrival_time();
        let key = queue.insert(patient, arrival_time);

        Ok(Admission {
            patient_id,
            specialty,
            key,
            triaged,
        })
    }

    pub fn queue(&self, specialty: Specialty) -> Result<&PriorityQueue, RoutingError> {
        self.queues
            .get(&specialty)
            .ok_or(RoutingError::UnknownSpecialty(specialty))
    }

    pub fn queue_mut(&mut self, specialty: Specialty) -> Result<&mut PriorityQueue, RoutingError> {
        self.queues
            .get_mut(&specialty)
            .ok_or(RoutingError::UnknownSpecialty(specialty))
    }

    /// Queue sizes in specialty order
    pub fn queue_sizes(&self) -> Vec<(Specialty, usize)> {
        self.queues.iter().map(|(&s, q)| (s, q.len())).collect()
    }

    /// Patients waiting across all queues
    pub fn total_queued(&self) -> usize {
        self.queues.values().map(PriorityQueue::len).sum()
    }

    pub fn queues(&self) -> &BTreeMap<Specialty, PriorityQueue> {
        &self.queues
    }
}

impl Default for AdmissionRouter {
    fn default() -> Self {
        Self::new()
    }
}
