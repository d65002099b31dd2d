//! Event logging for simulation replay and auditing.
//!
//! Every state change the scheduler makes to a patient is appended here:
//! admission into a queue, start of service and completion (natural or
//! forced by the end-of-shift drain).
//!
//! # Example
//!
//! ```rust
//! use triage_simulator_core_rs::models::{Event, EventLog, Specialty};
//!
//! let mut log = EventLog::new();
//! log.log(Event::Admitted {
//!     tick: 0,
//!     time: 0.0,
//!     patient_id: 1,
//!     severity: 1,
//!     specialty: Specialty::Emergency,
//!     triaged: true,
//! });
//!
//! assert_eq!(log.events_for_patient(1).len(), 1);
//! ```

use crate::core::time::SimTime;
use crate::models::patient::PatientId;
use crate::models::server::ServerId;
use crate::models::specialty::Specialty;
use serde::Serialize;

/// Simulation event capturing a state change.
///
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Patient entered a specialty queue
    Admitted {
        tick: usize,
        time: SimTime,
        patient_id: PatientId,
        severity: u8,
        specialty: Specialty,
        /// True if the router had to infer the specialty from severity
        triaged: bool,
    },

    /// Server took a patient from its queue
    ServiceStarted {
        tick: usize,
        time: SimTime,
        patient_id: PatientId,
        server_id: ServerId,
        wait: SimTime,
    },

    /// Server released a patient
    ServiceCompleted {
        tick: usize,
        time: SimTime,
        patient_id: PatientId,
        server_id: ServerId,
        service_duration: SimTime,
        /// True when closed by the end-of-run drain
        forced: bool,
    },
}

impl Event {
    pub fn tick(&self) -> usize {
        match self {
            Event::Admitted { tick, .. } => *tick,
            Event::ServiceStarted { tick, .. } => *tick,
            Event::ServiceCompleted { tick, .. } => *tick,
        }
    }

    pub fn time(&self) -> SimTime {
        match self {
            Event::Admitted { time, .. } => *time,
            Event::ServiceStarted { time, .. } => *time,
            Event::ServiceCompleted { time, .. } => *time,
        }
    }

    /// Short name of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Admitted { .. } => "Admitted",
            Event::ServiceStarted { .. } => "ServiceStarted",
            Event::ServiceCompleted { .. } => "ServiceCompleted",
        }
    }

    pub fn patient_id(&self) -> PatientId {
        match self {
            Event::Admitted { patient_id, .. } => *patient_id,
            Event::ServiceStarted { patient_id, .. } => *patient_id,
            Event::ServiceCompleted { patient_id, .. } => *patient_id,
        }
    }

    /// Server involved, if any
    pub fn server_id(&self) -> Option<ServerId> {
        match self {
            Event::ServiceStarted { server_id, .. } => Some(*server_id),
            Event::ServiceCompleted { server_id, .. } => Some(*server_id),
            Event::Admitted { .. } => None,
        }
    }
}

/// Append-only event log with simple queries
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_patient(&self, patient_id: PatientId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.patient_id() == patient_id)
            .collect()
    }

    pub fn events_for_server(&self, server_id: ServerId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.server_id() == Some(server_id))
            .collect()
    }
}
