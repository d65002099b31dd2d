//! Patient model
//!
//! Represents a single person moving through triage.
//! Each patient has:
//! - Identity and display name
//! - Severity (1 = most critical, 5 = least)
//! - Required specialty (unset until triage resolves it)
//! - Arrival, service-start and departure timestamps
//!
//! Lifecycle: created by a generator, specialty resolved once by the
//! admission router, timestamps stamped by the server that treats them,
//! then archived by the statistics collector. Patients are never dropped.

use crate::core::time::SimTime;
use crate::models::server::ServerId;
use crate::models::specialty::Specialty;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient identifier
pub type PatientId = u64;

/// Most critical severity
pub const MIN_SEVERITY: u8 = 1;

/// Least critical severity
pub const MAX_SEVERITY: u8 = 5;

/// Errors raised by patient lifecycle misuse
#[derive(Debug, Error, PartialEq)]
pub enum PatientError {
    #[error("Patient {0} already has a resolved specialty")]
    SpecialtyAlreadyResolved(PatientId),

    #[error("Patient {0} is already in service")]
    ServiceAlreadyStarted(PatientId),

    #[error("Patient {0} has not started service")]
    ServiceNotStarted(PatientId),
}

/// A patient awaiting or receiving care
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{Patient, Specialty};
///
/// let patient = Patient::new(1, "Avery Quinn".to_string(), 2, 0.0)
///     .with_specialty(Specialty::Cardiology);
///
/// assert_eq!(patient.severity(), 2);
/// assert_eq!(patient.specialty(), Some(Specialty::Cardiology));
/// assert!(patient.wait_time().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    id: PatientId,
    name: String,

    /// 1..=5, immutable after creation
    severity: u8,

    /// `None` until the admission router resolves it
    specialty: Option<Specialty>,

    arrival_time: SimTime,

    service_start: Option<SimTime>,

    /// Only ever set after `service_start`
    departure: Option<SimTime>,

    /// Server that treated (or is treating) this patient
    served_by: Option<ServerId>,
}

impl Patient {
    /// Create a new patient with no specialty and no service history
    ///
    /// # Panics
    /// Panics if severity is outside 1..=5 or arrival time is not finite
    pub fn new(id: PatientId, name: String, severity: u8, arrival_time: SimTime) -> Self {
        assert!(
            (MIN_SEVERITY..=MAX_SEVERITY).contains(&severity),
            "severity must be between 1 and 5"
        );
        assert!(arrival_time.is_finite(), "arrival_time must be finite");

        Self {
            id,
            name,
            severity,
            specialty: None,
            arrival_time,
            service_start: None,
            departure: None,
            served_by: None,
        }
    }

    /// Pre-assign the required specialty (generator-side referral)
    pub fn with_specialty(mut self, specialty: Specialty) -> Self {
        self.specialty = Some(specialty);
        self
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> u8 {
        self.severity
    }

    pub fn specialty(&self) -> Option<Specialty> {
        self.specialty
    }

    pub fn arrival_time(&self) -> SimTime {
        self.arrival_time
    }

    pub fn service_start(&self) -> Option<SimTime> {
        self.service_start
    }

    pub fn departure(&self) -> Option<SimTime> {
        self.departure
    }

    pub fn served_by(&self) -> Option<ServerId> {
        self.served_by
    }

    /// Time spent queued: `service_start - arrival`
    pub fn wait_time(&self) -> Option<SimTime> {
        self.service_start.map(|start| start - self.arrival_time)
    }

    /// Time spent in service: `departure - service_start`
    pub fn service_duration(&self) -> Option<SimTime> {
        match (self.service_start, self.departure) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// True once a departure has been stamped
    pub fn is_completed(&self) -> bool {
        self.departure.is_some()
    }

    /// Set the specialty. Allowed exactly once, and only if none was pre-assigned.
    pub fn resolve_specialty(&mut self, specialty: Specialty) -> Result<(), PatientError> {
        if self.specialty.is_some() {
            return Err(PatientError::SpecialtyAlreadyResolved(self.id));
        }
        self.specialty = Some(specialty);
        Ok(())
    }

    pub(crate) fn begin_service(
        &mut self,
        server_id: ServerId,
        time: SimTime,
    ) -> Result<(), PatientError> {
        if self.service_start.is_some() {
            return Err(PatientError::ServiceAlreadyStarted(self.id));
        }
        self.service_start = Some(time);
        self.served_by = Some(server_id);
        Ok(())
    }

    pub(crate) fn end_service(&mut self, time: SimTime) -> Result<(), PatientError> {
        if self.service_start.is_none() {
            return Err(PatientError::ServiceNotStarted(self.id));
        }
        self.departure = Some(time);
        Ok(())
    }
}
