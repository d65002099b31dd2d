//! Periodic status reporting
//!
//! The scheduler hands a read-only [`StatusSnapshot`] to a [`StatusReporter`]
//! every configured interval. Reporters only ever see borrowed snapshots and
//! cannot reach back into scheduler state.

use crate::core::time::SimTime;
use crate::models::patient::PatientId;
use crate::models::server::ServerId;
use crate::models::specialty::Specialty;
use serde::{Deserialize, Serialize};

/// One server's state at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub id: ServerId,
    pub name: String,
    pub specialty: Specialty,
    pub busy: bool,
    pub current_patient_id: Option<PatientId>,
    pub current_patient_name: Option<String>,
}

/// Point-in-time view of the whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub tick: usize,
    pub time: SimTime,
    /// Every specialty queue, in specialty order
    pub queue_sizes: Vec<(Specialty, usize)>,
    pub servers: Vec<ServerStatus>,
    pub completed: usize,
    pub pending_arrivals: usize,
}

impl StatusSnapshot {
    /// Patients waiting across all queues
    pub fn total_queued(&self) -> usize {
        self.queue_sizes.iter().map(|(_, n)| n).sum()
    }

    pub fn busy_servers(&self) -> usize {
        self.servers.iter().filter(|s| s.busy).count()
    }
}

/// Consumer of periodic status snapshots
pub trait StatusReporter {
    fn report(&mut self, snapshot: &StatusSnapshot);
}

/// Logs each snapshot through `tracing`
#[derive(Debug, Default)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn report(&mut self, snapshot: &StatusSnapshot) {
        tracing::info!(
            tick = snapshot.tick,
            time = snapshot.time,
            queued = snapshot.total_queued(),
            completed = snapshot.completed,
            busy = snapshot.busy_servers(),
            "status"
        );
        for server in &snapshot.servers {
            match &server.current_patient_name {
                Some(patient) => tracing::info!(
                    server = %server.name,
                    specialty = %server.specialty,
                    patient = %patient,
                    "serving"
                ),
                None => tracing::info!(
                    server = %server.name,
                    specialty = %server.specialty,
                    "available"
                ),
            }
        }
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub snapshots: Vec<StatusSnapshot>,
}

impl StatusReporter for CollectingReporter {
    fn report(&mut self, snapshot: &StatusSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}
