//! Statistics collector
//!
//! Holds the completed-patient list, in completion order, plus the roster of
//! servers so that idle servers still show up in the per-server breakdown.

use crate::core::time::SimTime;
use crate::models::patient::{Patient, PatientId, MAX_SEVERITY, MIN_SEVERITY};
use crate::models::server::{Server, ServerId};
use crate::models::specialty::Specialty;
use crate::stats::summary::{
    GroupStats, ServerStats, SeverityStats, SpecialtyStats, Summary, WaitStats,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Patient {0} has no departure time and cannot be recorded")]
    IncompletePatient(PatientId),

    #[error("Patient {0} was already recorded")]
    DuplicatePatient(PatientId),
}

/// Static description of a server, for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub id: ServerId,
    pub name: String,
    pub specialty: Specialty,
}

impl From<&Server> for ServerInfo {
    fn from(server: &Server) -> Self {
        ServerInfo {
            id: server.id(),
            name: server.name().to_string(),
            specialty: server.specialty(),
        }
    }
}

/// Append-only record of completed patients
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{Patient, Server, Specialty, StatisticsCollector};
///
/// let mut server = Server::new(1, "Dr. Hale".to_string(), Specialty::Emergency, 10.0);
/// let mut stats = StatisticsCollector::new();
/// stats.register_server(&server);
///
/// let patient = Patient::new(1, "Rin".to_string(), 1, 0.0).with_specialty(Specialty::Emergency);
/// server.start_service(patient, 2.0).unwrap();
/// stats.record(server.finish_service(12.0).unwrap()).unwrap();
///
/// let summary = stats.summary();
/// assert_eq!(summary.total_completed, 1);
/// assert_eq!(summary.wait.unwrap().mean, 2.0);
/// assert_eq!(summary.server(1).unwrap().mean_service_duration, 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatisticsCollector {
    completed: Vec<Patient>,
    recorded_ids: BTreeSet<PatientId>,
    servers: BTreeMap<ServerId, ServerInfo>,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a server to the roster (re-registering replaces the entry)
    pub fn register_server(&mut self, server: &Server) {
        self.servers.insert(server.id(), ServerInfo::from(server));
    }

    /// Append a completed patient
    pub fn record(&mut self, patient: Patient) -> Result<(), StatsError> {
        if !patient.is_completed() {
            return Err(StatsError::IncompletePatient(patient.id()));
        }
        if !self.recorded_ids.insert(patient.id()) {
            return Err(StatsError::DuplicatePatient(patient.id()));
        }
        self.completed.push(patient);
        Ok(())
    }

    /// Completed patients in completion order
    pub fn completed(&self) -> &[Patient] {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn servers(&self) -> impl Iterator<Item = &ServerInfo> {
        self.servers.values()
    }

    /// Derive every aggregate from the completed list
    pub fn summary(&self) -> Summary {
        let waits: Vec<SimTime> = self.completed.iter().filter_map(Patient::wait_time).collect();

        let wait = if waits.is_empty() {
            None
        } else {
            Some(WaitStats {
                mean: mean(&waits),
                min: waits.iter().copied().fold(SimTime::INFINITY, SimTime::min),
                max: waits.iter().copied().fold(SimTime::NEG_INFINITY, SimTime::max),
            })
        };

        let by_severity = (MIN_SEVERITY..=MAX_SEVERITY)
            .map(|severity| SeverityStats {
                severity,
                stats: group_stats(self.completed.iter().filter(|p| p.severity() == severity)),
            })
            .collect();

        let mut specialty_groups: BTreeMap<Specialty, Vec<&Patient>> = BTreeMap::new();
        for patient in &self.completed {
            if let Some(specialty) = patient.specialty() {
                specialty_groups.entry(specialty).or_default().push(patient);
            }
        }
        let by_specialty = specialty_groups
            .into_iter()
            .map(|(specialty, patients)| SpecialtyStats {
                specialty,
                stats: group_stats(patients.into_iter()),
            })
            .collect();

        let by_server = self
            .servers
            .values()
            .map(|info| {
                let durations: Vec<SimTime> = self
                    .completed
                    .iter()
                    .filter(|p| p.served_by() == Some(info.id))
                    .filter_map(Patient::service_duration)
                    .collect();
                ServerStats {
                    id: info.id,
                    name: info.name.clone(),
                    specialty: info.specialty,
                    completed: durations.len(),
                    mean_service_duration: mean(&durations),
                }
            })
            .collect();

        Summary {
            total_completed: self.completed.len(),
            wait,
            by_severity,
            by_specialty,
            by_server,
        }
    }
}

fn group_stats<'a>(patients: impl Iterator<Item = &'a Patient>) -> GroupStats {
    let mut count = 0;
    let mut total_wait = 0.0;
    for patient in patients {
        count += 1;
        total_wait += patient.wait_time().unwrap_or(0.0);
    }
    GroupStats {
        count,
        mean_wait: if count == 0 { 0.0 } else { total_wait / count as SimTime },
    }
}

fn mean(values: &[SimTime]) -> SimTime {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<SimTime>() / values.len() as SimTime
    }
}
