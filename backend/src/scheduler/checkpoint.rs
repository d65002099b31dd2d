//! Checkpoint - Save/Load Scheduler State
//!
//! Serializes the complete scheduler state so a run can be paused and resumed
//! exactly. The event log is not part of a checkpoint.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a resumed run produces the same results as an
//!   uninterrupted one (the RNG state is captured, not the seed)
//! - **Patient Conservation**: every patient appears exactly once across
//!   queues, servers, pending arrivals and the completed list
//! - **Queue Integrity**: queued patients sit in the queue of their specialty
//!   with a key matching their severity and arrival time
//! - **Arrival Order**: pending arrivals are sorted by arrival time, as the
//!   release step expects
//! - **Config Matching**: state can only be loaded with the config it was
//!   taken with

use crate::core::time::SimTime;
use crate::models::patient::{Patient, PatientId};
use crate::models::server::{ActiveService, Server, ServerId};
use crate::models::specialty::Specialty;
use crate::queue::QueuedPatient;
use crate::scheduler::engine::{SchedulerConfig, ServiceRecord, SimulationError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete scheduler state snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// SHA256 hash of the config (for validation)
    pub config_hash: String,

    /// Next tick to run
    pub tick: usize,

    pub finished: bool,

    /// RNG state at time of snapshot
    pub rng_state: u64,

    pub forced_completions: usize,

    /// One entry per specialty, entries in priority order
    pub queues: Vec<QueueSnapshot>,

    pub servers: Vec<ServerSnapshot>,

    /// Scheduled arrivals not yet released
    pub pending: Vec<Patient>,

    /// Completed patients in completion order
    pub completed: Vec<Patient>,
}

/// Queue contents with their priority keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub specialty: Specialty,
    pub entries: Vec<QueuedPatient>,
}

/// Server state snapshot, including its treatment history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSnapshot {
    pub id: ServerId,
    pub name: String,
    pub specialty: Specialty,
    pub mean_service_duration: SimTime,
    pub active: Option<ActiveService>,
    pub completed_count: usize,
    pub total_service_time: SimTime,
    pub history: Vec<ServiceRecord>,
}

impl ServerSnapshot {
    pub fn new(server: &Server, history: Vec<ServiceRecord>) -> Self {
        ServerSnapshot {
            id: server.id(),
            name: server.name().to_string(),
            specialty: server.specialty(),
            mean_service_duration: server.mean_service_duration(),
            active: server.active_service().cloned(),
            completed_count: server.completed_count(),
            total_service_time: server.total_service_time(),
            history,
        }
    }

    /// Split back into a live server and its history
    pub fn into_parts(self) -> (Server, Vec<ServiceRecord>) {
        let server = Server::from_parts(
            self.id,
            self.name,
            self.specialty,
            self.mean_service_duration,
            self.active,
            self.completed_count,
            self.total_service_time,
        );
        (server, self.history)
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Object keys are sorted recursively before hashing so the digest does not
/// depend on field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation Functions
// ============================================================================

fn invalid(message: String) -> SimulationError {
    SimulationError::StateValidation(message)
}

/// Validate state snapshot integrity against the config it will run under
pub fn validate_snapshot(
    snapshot: &StateSnapshot,
    config: &SchedulerConfig,
) -> Result<(), SimulationError> {
    let mut seen: BTreeSet<PatientId> = BTreeSet::new();
    let mut claim = |id: PatientId, place: &str| {
        if seen.insert(id) {
            Ok(())
        } else {
            Err(invalid(format!("Patient {} appears twice (again in {})", id, place)))
        }
    };

    // 1. One queue per specialty, each entry consistent with its key
    let specialties: BTreeSet<Specialty> = snapshot.queues.iter().map(|q| q.specialty).collect();
    if specialties.len() != snapshot.queues.len() || specialties.len() != Specialty::ALL.len() {
        return Err(invalid(format!(
            "Expected one queue per specialty, found {} queues",
            snapshot.queues.len()
        )));
    }
    for queue in &snapshot.queues {
        for entry in &queue.entries {
            let patient = &entry.patient;
            claim(patient.id(), "a queue")?;
            if patient.specialty() != Some(queue.specialty) {
                return Err(invalid(format!(
                    "Patient {} is queued under {} but has specialty {:?}",
                    patient.id(),
                    queue.specialty,
                    patient.specialty()
                )));
            }
            if entry.key.severity != patient.severity()
                || entry.key.arrival_time != patient.arrival_time()
            {
                return Err(invalid(format!(
                    "Queue key of patient {} does not match its severity and arrival time",
                    patient.id()
                )));
            }
            if patient.service_start().is_some() {
                return Err(invalid(format!(
                    "Queued patient {} has already started service",
                    patient.id()
                )));
            }
        }
    }

    // 2. Servers match the config and their bound patients
    let mut server_ids: Vec<ServerId> = snapshot.servers.iter().map(|s| s.id).collect();
    server_ids.sort_unstable();
    let mut config_ids: Vec<ServerId> = config.servers.iter().map(|s| s.id).collect();
    config_ids.sort_unstable();
    if server_ids != config_ids {
        return Err(invalid(format!(
            "Server ids {:?} do not match config {:?}",
            server_ids, config_ids
        )));
    }
    for server in &snapshot.servers {
        let Some(active) = &server.active else {
            continue;
        };
        let patient = &active.patient;
        claim(patient.id(), "a server")?;
        if snapshot.finished {
            return Err(invalid(format!(
                "Finished run still has patient {} on server {}",
                patient.id(),
                server.id
            )));
        }
        if patient.service_start() != Some(active.started_at)
            || patient.served_by() != Some(server.id)
            || patient.departure().is_some()
        {
            return Err(invalid(format!(
                "Patient {} on server {} has inconsistent service times",
                patient.id(),
                server.id
            )));
        }
    }

    // 3. Pending arrivals have not been admitted and are sorted by arrival
    for patient in &snapshot.pending {
        claim(patient.id(), "pending arrivals")?;
        if patient.service_start().is_some() {
            return Err(invalid(format!(
                "Pending patient {} has already started service",
                patient.id()
            )));
        }
    }
    if let Some(pair) = snapshot
        .pending
        .windows(2)
        .find(|pair| pair[0].arrival_time() > pair[1].arrival_time())
    {
        return Err(invalid(format!(
            "Pending arrivals out of order: patient {} at {} before patient {} at {}",
            pair[0].id(),
            pair[0].arrival_time(),
            pair[1].id(),
            pair[1].arrival_time()
        )));
    }

    // 4. Completed patients are actually completed
    for patient in &snapshot.completed {
        claim(patient.id(), "the completed list")?;
        if !patient.is_completed() {
            return Err(invalid(format!(
                "Completed patient {} has no departure time",
                patient.id()
            )));
        }
    }

    Ok(())
}
