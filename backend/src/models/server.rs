//! Server (specialist) model
//!
//! A server treats one patient at a time. The patient currently in service is
//! owned by the server: it is moved in from a queue by `start_service` and
//! moved out again by `finish_service`, never copied.
//!
//! # Critical Invariants
//!
//! 1. A server is busy if and only if it holds a patient
//! 2. A bound patient always has a service-start time equal to the server's
//! 3. Cumulative statistics only change on `finish_service`

use crate::core::time::SimTime;
use crate::models::patient::{Patient, PatientError};
use crate::models::specialty::Specialty;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server identifier
pub type ServerId = u64;

/// Errors raised by misuse of the server state machine
#[derive(Debug, Error, PartialEq)]
pub enum ServerError {
    #[error("Server {0} is already serving a patient")]
    AlreadyBusy(ServerId),

    #[error("Server {0} is not serving any patient")]
    NotBusy(ServerId),

    #[error(transparent)]
    Patient(#[from] PatientError),
}

/// The patient in service together with the time service began
///
/// Bundling both in one optional slot makes "busy iff bound patient"
/// hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveService {
    pub patient: Patient,
    pub started_at: SimTime,
}

/// A specialist with a fixed mean service duration
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{Patient, Server, Specialty};
///
/// let mut server = Server::new(1, "Dr. Rowe".to_string(), Specialty::Emergency, 10.0);
/// let patient = Patient::new(1, "Sam Ortiz".to_string(), 1, 0.0)
///     .with_specialty(Specialty::Emergency);
///
/// server.start_service(patient, 0.0).unwrap();
/// assert!(server.is_busy());
/// assert_eq!(server.remaining_time(4.0), 6.0);
///
/// let done = server.finish_service(10.0).unwrap();
/// assert_eq!(done.departure(), Some(10.0));
/// assert!(!server.is_busy());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    id: ServerId,
    name: String,
    specialty: Specialty,
    mean_service_duration: SimTime,
    active: Option<ActiveService>,
    completed_count: usize,
    total_service_time: SimTime,
}

impl Server {
    /// Create an idle server
    ///
    /// # Panics
    /// Panics if `mean_service_duration` is not positive
    pub fn new(
        id: ServerId,
        name: String,
        specialty: Specialty,
        mean_service_duration: SimTime,
    ) -> Self {
        assert!(
            mean_service_duration > 0.0 && mean_service_duration.is_finite(),
            "mean_service_duration must be positive"
        );
        Self {
            id,
            name,
            specialty,
            mean_service_duration,
            active: None,
            completed_count: 0,
            total_service_time: 0.0,
        }
    }

    /// Rebuild a server from checkpointed parts
    pub(crate) fn from_parts(
        id: ServerId,
        name: String,
        specialty: Specialty,
        mean_service_duration: SimTime,
        active: Option<ActiveService>,
        completed_count: usize,
        total_service_time: SimTime,
    ) -> Self {
        Self {
            id,
            name,
            specialty,
            mean_service_duration,
            active,
            completed_count,
            total_service_time,
        }
    }

    pub fn id(&self) -> ServerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> Specialty {
        self.specialty
    }

    pub fn mean_service_duration(&self) -> SimTime {
        self.mean_service_duration
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_patient(&self) -> Option<&Patient> {
        self.active.as_ref().map(|a| &a.patient)
    }

    pub fn service_started_at(&self) -> Option<SimTime> {
        self.active.as_ref().map(|a| a.started_at)
    }

    pub fn active_service(&self) -> Option<&ActiveService> {
        self.active.as_ref()
    }

    /// Number of services finished so far
    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    /// Sum of actual elapsed service durations
    pub fn total_service_time(&self) -> SimTime {
        self.total_service_time
    }

    /// Check that `patient` could start service here, without taking it
    ///
    /// Callers that would otherwise lose the patient on a rejected
    /// `start_service` check first and keep ownership on error.
    pub fn check_start(&self, patient: &Patient) -> Result<(), ServerError> {
        if self.is_busy() {
            return Err(ServerError::AlreadyBusy(self.id));
        }
        if patient.service_start().is_some() {
            return Err(PatientError::ServiceAlreadyStarted(patient.id()).into());
        }
        Ok(())
    }

    /// Bind a patient and stamp both start times
    ///
    /// Errors here are state-machine misuse. The scheduler runs
    /// [`Server::check_start`] first, so on its path this cannot fail.
    pub fn start_service(&mut self, mut patient: Patient, now: SimTime) -> Result<(), ServerError> {
        self.check_start(&patient)?;
        patient.begin_service(self.id, now)?;
        self.active = Some(ActiveService {
            patient,
            started_at: now,
        });
        Ok(())
    }

    /// `max(0, mean - elapsed)`; zero while idle
    pub fn remaining_time(&self, now: SimTime) -> SimTime {
        match &self.active {
            Some(active) => (self.mean_service_duration - (now - active.started_at)).max(0.0),
            None => 0.0,
        }
    }

    /// Stamp the departure, fold the actual elapsed time into the totals and
    /// hand the patient back
    pub fn finish_service(&mut self, now: SimTime) -> Result<Patient, ServerError> {
        let ActiveService {
            mut patient,
            started_at,
        } = self.active.take().ok_or(ServerError::NotBusy(self.id))?;

        if let Err(e) = patient.end_service(now) {
            // Put the slot back untouched so the server state stays consistent
            self.active = Some(ActiveService {
                patient,
                started_at,
            });
            return Err(e.into());
        }

        self.completed_count += 1;
        self.total_service_time += now - started_at;
        Ok(patient)
    }
}
