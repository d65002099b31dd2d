//! Scheduler Engine
//!
//! Time-stepped service allocation. Each tick is evaluated at the current
//! clock value and runs these phases in a fixed order:
//!
//! ```text
//! For each tick t (clock = t * step):
//! 1. Admit scheduled arrivals whose arrival time has been reached
//! 2. Dispatch: every idle server takes the head of its specialty queue
//! 3. Complete: every busy server whose remaining time is zero releases its patient
//! 4. Backfill: servers released in step 3 take the next patient at the same instant
//! 5. Report: emit a read-only status snapshot on interval boundaries
//! 6. Advance the clock; once it reaches the total duration, force-drain
//! ```
//!
//! Servers are always visited in ascending id order, so a run is fully
//! reproducible from its config, its inputs and its seed.
//!
//! # Example
//!
//! ```rust
//! use triage_simulator_core_rs::scheduler::{Scheduler, SchedulerConfig, ServerConfig};
//! use triage_simulator_core_rs::{Patient, Specialty};
//!
//! let config = SchedulerConfig {
//!     total_duration: 30.0,
//!     step: 1.0,
//!     report_interval: None,
//!     rng_seed: 42,
//!     servers: vec![ServerConfig {
//!         id: 1,
//!         name: "Dr. Moss".to_string(),
//!         specialty: Specialty::Emergency,
//!         mean_service_duration: 10.0,
//!     }],
//! };
//!
//! let mut scheduler = Scheduler::new(config).unwrap();
//! scheduler.admit(Patient::new(1, "P1".to_string(), 1, 0.0)).unwrap();
//! scheduler.admit(Patient::new(2, "P2".to_string(), 1, 5.0)).unwrap();
//!
//! let report = scheduler.run().unwrap();
//! assert_eq!(report.summary.total_completed, 2);
//! assert_eq!(report.summary.wait.unwrap().mean, 2.5);
//! ```

use crate::core::time::{SimClock, SimTime, TIME_EPSILON};
use crate::models::event::{Event, EventLog};
use crate::models::patient::{Patient, PatientError, PatientId};
use crate::models::server::{Server, ServerError, ServerId};
use crate::models::specialty::Specialty;
use crate::queue::{PriorityQueue, QueueError};
use crate::reporting::{ServerStatus, StatusReporter, StatusSnapshot};
use crate::rng::RngManager;
use crate::routing::{Admission, AdmissionRouter, RoutingError};
use crate::scheduler::checkpoint::{
    compute_config_hash, validate_snapshot, QueueSnapshot, ServerSnapshot, StateSnapshot,
};
use crate::stats::{FinalReport, StatisticsCollector, StatsError, Summary};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Simulation time at which the run stops and drains
    pub total_duration: SimTime,

    /// Simulation time advanced per tick
    #[serde(default = "default_step")]
    pub step: SimTime,

    /// Emit a status snapshot every this many time units
    #[serde(default)]
    pub report_interval: Option<SimTime>,

    /// Seed for the triage coin flip
    #[serde(default)]
    pub rng_seed: u64,

    pub servers: Vec<ServerConfig>,
}

fn default_step() -> SimTime {
    1.0
}

/// Per-server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub id: ServerId,
    pub name: String,
    pub specialty: Specialty,
    pub mean_service_duration: SimTime,
}

impl From<&ServerConfig> for Server {
    fn from(config: &ServerConfig) -> Self {
        Server::new(
            config.id,
            config.name.clone(),
            config.specialty,
            config.mean_service_duration,
        )
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// One entry of a server's treatment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub severity: u8,
    pub started_at: SimTime,
    pub finished_at: SimTime,
    pub wait: SimTime,
    pub service_duration: SimTime,
    /// Closed by the end-of-run drain rather than by running its course
    pub forced: bool,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub tick: usize,

    /// Clock value the tick was evaluated at
    pub time: SimTime,

    /// Scheduled arrivals released into queues this tick
    pub num_admitted: usize,

    pub num_dispatched: usize,

    pub num_completed: usize,

    /// Services closed by the drain (non-zero only on the final tick)
    pub num_forced: usize,

    /// Patients waiting after this tick
    pub queued: usize,

    pub busy_servers: usize,

    /// True if this tick ended the run
    pub finished: bool,
}

/// Simulation error types
///
/// Everything except `InvalidConfig`, `DuplicatePatient`, `SimulationFinished`
/// and the checkpoint variants signals a broken internal invariant.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Patient {0} was already admitted")]
    DuplicatePatient(PatientId),

    #[error("Simulation already finished")]
    SimulationFinished,

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Patient(#[from] PatientError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("State validation error: {0}")]
    StateValidation(String),

    #[error("Checkpoint was taken with a different config (expected {expected}, found {found})")]
    ConfigMismatch { expected: String, found: String },
}

// ============================================================================
// Scheduler
// ============================================================================

/// Owns every queue, server and completed patient of a run
///
/// # Patient accounting
///
/// Every patient handed to the scheduler is, at any tick boundary, in exactly
/// one place: pending arrival, a specialty queue, a server, or the completed
/// list. After the final drain no patient is left on a server.
pub struct Scheduler {
    config: SchedulerConfig,
    clock: SimClock,
    rng: RngManager,
    router: AdmissionRouter,

    /// Sorted by ascending id
    servers: Vec<Server>,

    /// Future arrivals, sorted by arrival time (stable)
    pending: Vec<Patient>,

    stats: StatisticsCollector,
    history: BTreeMap<ServerId, Vec<ServiceRecord>>,
    event_log: EventLog,
    known_patients: BTreeSet<PatientId>,
    forced_completions: usize,
    finished: bool,
}

impl Scheduler {
    /// Create a scheduler from configuration
    ///
    /// Validates the config, creates one queue per specialty and one idle
    /// server per `ServerConfig`.
    pub fn new(config: SchedulerConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let mut servers: Vec<Server> = config.servers.iter().map(Server::from).collect();
        servers.sort_by_key(Server::id);

        let mut stats = StatisticsCollector::new();
        let mut history = BTreeMap::new();
        for server in &servers {
            stats.register_server(server);
            history.insert(server.id(), Vec::new());
        }

        let router = AdmissionRouter::new();
        router.validate()?;

        Ok(Self {
            clock: SimClock::new(config.step, config.total_duration),
            rng: RngManager::new(config.rng_seed),
            router,
            servers,
            pending: Vec::new(),
            stats,
            history,
            event_log: EventLog::new(),
            known_patients: BTreeSet::new(),
            forced_completions: 0,
            finished: false,
            config,
        })
    }

    fn validate_config(config: &SchedulerConfig) -> Result<(), SimulationError> {
        if !(config.total_duration > 0.0 && config.total_duration.is_finite()) {
            return Err(SimulationError::InvalidConfig(
                "total_duration must be positive".to_string(),
            ));
        }
        if !(config.step > 0.0 && config.step.is_finite()) {
            return Err(SimulationError::InvalidConfig(
                "step must be positive".to_string(),
            ));
        }
        if let Some(interval) = config.report_interval {
            if !(interval > 0.0 && interval.is_finite()) {
                return Err(SimulationError::InvalidConfig(
                    "report_interval must be positive".to_string(),
                ));
            }
        }
        if config.servers.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "at least one server is required".to_string(),
            ));
        }

        let mut ids = BTreeSet::new();
        for server in &config.servers {
            if !ids.insert(server.id) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate server id {}",
                    server.id
                )));
            }
            if !(server.mean_service_duration > 0.0 && server.mean_service_duration.is_finite()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "server {} must have a positive mean_service_duration",
                    server.id
                )));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Servers in ascending id order
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.servers.iter().find(|s| s.id() == id)
    }

    pub fn router(&self) -> &AdmissionRouter {
        &self.router
    }

    pub fn queue(&self, specialty: Specialty) -> Result<&PriorityQueue, SimulationError> {
        Ok(self.router.queue(specialty)?)
    }

    pub fn total_queued(&self) -> usize {
        self.router.total_queued()
    }

    /// Patients scheduled for a future arrival time
    pub fn pending_arrivals(&self) -> &[Patient] {
        &self.pending
    }

    pub fn patients_in_service(&self) -> usize {
        self.servers.iter().filter(|s| s.is_busy()).count()
    }

    /// Completed patients in completion order
    pub fn completed(&self) -> &[Patient] {
        self.stats.completed()
    }

    pub fn statistics(&self) -> &StatisticsCollector {
        &self.stats
    }

    pub fn summary(&self) -> Summary {
        self.stats.summary()
    }

    /// Treatment history of one server (empty for unknown ids)
    pub fn history(&self, server_id: ServerId) -> &[ServiceRecord] {
        self.history
            .get(&server_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Number of distinct patients handed to this scheduler
    pub fn known_patients(&self) -> usize {
        self.known_patients.len()
    }

    pub fn forced_completions(&self) -> usize {
        self.forced_completions
    }

    // ------------------------------------------------------------------------
    // Admission
    // ------------------------------------------------------------------------

    /// Route a patient into its specialty queue right away
    ///
    /// The patient's own arrival time is used as its queue key, whatever the
    /// current clock says.
    pub fn admit(&mut self, patient: Patient) -> Result<Admission, SimulationError> {
        if self.finished {
            return Err(SimulationError::SimulationFinished);
        }
        if !self.known_patients.insert(patient.id()) {
            return Err(SimulationError::DuplicatePatient(patient.id()));
        }
        self.route(patient)
    }

    /// Hold a patient until the clock reaches their arrival time
    ///
    /// Patients whose arrival time has already been reached are admitted
    /// immediately.
    pub fn schedule_arrival(&mut self, patient: Patient) -> Result<(), SimulationError> {
        if self.finished {
            return Err(SimulationError::SimulationFinished);
        }
        if !self.known_patients.insert(patient.id()) {
            return Err(SimulationError::DuplicatePatient(patient.id()));
        }

        if patient.arrival_time() <= self.clock.now() + TIME_EPSILON {
            self.route(patient)?;
        } else {
            let at = self
                .pending
                .partition_point(|p| p.arrival_time() <= patient.arrival_time());
            self.pending.insert(at, patient);
        }
        Ok(())
    }

    fn route(&mut self, patient: Patient) -> Result<Admission, SimulationError> {
        let severity = patient.severity();
        let admission = self.router.admit(patient, &mut self.rng)?;

        if !self
            .servers
            .iter()
            .any(|s| s.specialty() == admission.specialty)
        {
            tracing::warn!(
                patient = admission.patient_id,
                specialty = %admission.specialty,
                "no server can treat this specialty; patient will stay queued"
            );
        }

        tracing::debug!(
            tick = self.clock.current_tick(),
            patient = admission.patient_id,
            severity,
            specialty = %admission.specialty,
            triaged = admission.triaged,
            "admitted"
        );

        self.event_log.log(Event::Admitted {
            tick: self.clock.current_tick(),
            time: self.clock.now(),
            patient_id: admission.patient_id,
            severity,
            specialty: admission.specialty,
            triaged: admission.triaged,
        });

        Ok(admission)
    }

    // ------------------------------------------------------------------------
    // Tick loop
    // ------------------------------------------------------------------------

    /// Run one tick without status reporting
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        self.tick_inner(None)
    }

    /// Run one tick, handing snapshots on interval boundaries to `reporter`
    pub fn tick_reporting(
        &mut self,
        reporter: &mut dyn StatusReporter,
    ) -> Result<TickResult, SimulationError> {
        self.tick_inner(Some(reporter))
    }

    fn tick_inner(
        &mut self,
        reporter: Option<&mut dyn StatusReporter>,
    ) -> Result<TickResult, SimulationError> {
        if self.finished {
            return Err(SimulationError::SimulationFinished);
        }

        let tick = self.clock.current_tick();
        let now = self.clock.now();

        // STEP 1: SCHEDULED ARRIVALS
        let num_admitted = self.release_arrivals(now)?;

        // STEP 2: DISPATCH
        let mut num_dispatched = self.dispatch(tick, now)?;

        // STEP 3: COMPLETE
        let num_completed = self.complete(tick, now)?;

        // STEP 4: BACKFILL servers freed this instant
        if num_completed > 0 {
            num_dispatched += self.dispatch(tick, now)?;
        }

        // STEP 5: PERIODIC REPORT
        if let Some(reporter) = reporter {
            if self.is_report_tick(tick, now) {
                reporter.report(&self.status_snapshot());
            }
        }

        // STEP 6: ADVANCE / TERMINATE
        self.clock.advance_tick();
        let (closed_at_end, num_forced) = if self.clock.is_complete() {
            self.finish_run()?
        } else {
            (0, 0)
        };

        Ok(TickResult {
            tick,
            time: now,
            num_admitted,
            num_dispatched,
            num_completed: num_completed + closed_at_end,
            num_forced,
            queued: self.router.total_queued(),
            busy_servers: self.patients_in_service(),
            finished: self.finished,
        })
    }

    /// Tick until the run terminates, then return the final report
    pub fn run(&mut self) -> Result<FinalReport, SimulationError> {
        tracing::info!(
            total_duration = self.config.total_duration,
            step = self.config.step,
            servers = self.servers.len(),
            queued = self.router.total_queued(),
            pending = self.pending.len(),
            "starting run"
        );
        while !self.finished {
            self.tick_inner(None)?;
        }
        Ok(self.final_report())
    }

    /// Like [`Scheduler::run`], with periodic status reports
    pub fn run_reporting(
        &mut self,
        reporter: &mut dyn StatusReporter,
    ) -> Result<FinalReport, SimulationError> {
        tracing::info!(
            total_duration = self.config.total_duration,
            step = self.config.step,
            servers = self.servers.len(),
            queued = self.router.total_queued(),
            pending = self.pending.len(),
            "starting run"
        );
        while !self.finished {
            self.tick_reporting(reporter)?;
        }
        Ok(self.final_report())
    }

    /// Force every in-progress service to complete now and end the run
    ///
    /// Called automatically once the clock reaches the total duration; may
    /// also be called at any tick boundary to stop early. Services whose time
    /// is already up complete normally first; only the rest count as forced.
    /// Returns the forced count. Idempotent.
    pub fn drain(&mut self) -> Result<usize, SimulationError> {
        self.finish_run().map(|(_, forced)| forced)
    }

    /// Returns `(completed normally, forced)` for the closing instant
    fn finish_run(&mut self) -> Result<(usize, usize), SimulationError> {
        if self.finished {
            return Ok((0, 0));
        }

        let tick = self.clock.current_tick();
        let now = self.clock.now().min(self.clock.total_duration());

        let natural = self.complete(tick, now)?;

        let mut released = Vec::new();
        for server in self.servers.iter_mut().filter(|s| s.is_busy()) {
            released.push((server.id(), server.finish_service(now)?));
        }

        let forced = released.len();
        for (server_id, patient) in released {
            self.archive(tick, now, server_id, patient, true)?;
        }

        self.forced_completions += forced;
        self.finished = true;

        tracing::info!(
            tick,
            time = now,
            natural,
            forced,
            completed = self.stats.len(),
            still_queued = self.router.total_queued(),
            "run finished"
        );
        Ok((natural, forced))
    }

    fn release_arrivals(&mut self, now: SimTime) -> Result<usize, SimulationError> {
        let due = self
            .pending
            .partition_point(|p| p.arrival_time() <= now + TIME_EPSILON);
        let arrivals: Vec<Patient> = self.pending.drain(..due).collect();
        for patient in arrivals {
            self.route(patient)?;
        }
        Ok(due)
    }

    fn dispatch(&mut self, tick: usize, now: SimTime) -> Result<usize, SimulationError> {
        let mut started = 0;

        for server in self.servers.iter_mut() {
            if server.is_busy() {
                continue;
            }
            let queue = self.router.queue_mut(server.specialty())?;
            let Some(head) = queue.peek() else {
                continue;
            };
            // Rejected patients stay queued
            server.check_start(head)?;

            let patient = queue.extract_min()?;
            let patient_id = patient.id();
            let wait = now - patient.arrival_time();
            server.start_service(patient, now)?;

            tracing::debug!(
                tick,
                time = now,
                patient = patient_id,
                server = server.id(),
                wait,
                "service started"
            );
            self.event_log.log(Event::ServiceStarted {
                tick,
                time: now,
                patient_id,
                server_id: server.id(),
                wait,
            });
            started += 1;
        }

        Ok(started)
    }

    fn complete(&mut self, tick: usize, now: SimTime) -> Result<usize, SimulationError> {
        let mut released = Vec::new();
        for server in self.servers.iter_mut() {
            if server.is_busy() && server.remaining_time(now) <= TIME_EPSILON {
                released.push((server.id(), server.finish_service(now)?));
            }
        }

        let count = released.len();
        for (server_id, patient) in released {
            self.archive(tick, now, server_id, patient, false)?;
        }
        Ok(count)
    }

    /// Move a finished patient into history, the event log and the stats
    fn archive(
        &mut self,
        tick: usize,
        now: SimTime,
        server_id: ServerId,
        patient: Patient,
        forced: bool,
    ) -> Result<(), SimulationError> {
        let started_at = patient
            .service_start()
            .ok_or(PatientError::ServiceNotStarted(patient.id()))?;
        let service_duration = now - started_at;

        tracing::debug!(
            tick,
            time = now,
            patient = patient.id(),
            server = server_id,
            service_duration,
            forced,
            "service completed"
        );

        self.history
            .entry(server_id)
            .or_default()
            .push(ServiceRecord {
                patient_id: patient.id(),
                patient_name: patient.name().to_string(),
                severity: patient.severity(),
                started_at,
                finished_at: now,
                wait: started_at - patient.arrival_time(),
                service_duration,
                forced,
            });

        self.event_log.log(Event::ServiceCompleted {
            tick,
            time: now,
            patient_id: patient.id(),
            server_id,
            service_duration,
            forced,
        });

        self.stats.record(patient)?;
        Ok(())
    }

    /// True on tick 0 and on every tick whose clock crosses a multiple of the
    /// report interval
    fn is_report_tick(&self, tick: usize, now: SimTime) -> bool {
        let Some(interval) = self.config.report_interval else {
            return false;
        };
        if tick == 0 {
            return true;
        }
        let previous = now - self.config.step;
        ((now + TIME_EPSILON) / interval).floor() > ((previous + TIME_EPSILON) / interval).floor()
    }

    // ------------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------------

    /// Point-in-time view for the reporting layer
    pub fn status_snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            tick: self.clock.current_tick(),
            time: self.clock.now(),
            queue_sizes: self.router.queue_sizes(),
            servers: self
                .servers
                .iter()
                .map(|s| ServerStatus {
                    id: s.id(),
                    name: s.name().to_string(),
                    specialty: s.specialty(),
                    busy: s.is_busy(),
                    current_patient_id: s.current_patient().map(Patient::id),
                    current_patient_name: s.current_patient().map(|p| p.name().to_string()),
                })
                .collect(),
            completed: self.stats.len(),
            pending_arrivals: self.pending.len(),
        }
    }

    /// Aggregates plus throughput, as of now
    pub fn final_report(&self) -> FinalReport {
        let total_duration = self.config.total_duration;
        let throughput = if total_duration > 0.0 {
            self.stats.len() as f64 / total_duration
        } else {
            0.0
        };
        FinalReport {
            summary: self.stats.summary(),
            total_duration,
            throughput,
            still_queued: self.router.total_queued(),
            pending_arrivals: self.pending.len(),
            forced_completions: self.forced_completions,
        }
    }

    // ------------------------------------------------------------------------
    // Checkpointing
    // ------------------------------------------------------------------------

    /// Capture the complete run state
    pub fn snapshot(&self) -> Result<StateSnapshot, SimulationError> {
        Ok(StateSnapshot {
            config_hash: compute_config_hash(&self.config)?,
            tick: self.clock.current_tick(),
            finished: self.finished,
            rng_state: self.rng.get_state(),
            forced_completions: self.forced_completions,
            queues: self
                .router
                .queues()
                .iter()
                .map(|(&specialty, queue)| QueueSnapshot {
                    specialty,
                    entries: queue.entries(),
                })
                .collect(),
            servers: self
                .servers
                .iter()
                .map(|s| ServerSnapshot::new(s, self.history(s.id()).to_vec()))
                .collect(),
            pending: self.pending.clone(),
            completed: self.stats.completed().to_vec(),
        })
    }

    /// Serialize the complete run state to JSON
    pub fn save_state(&self) -> Result<String, SimulationError> {
        serde_json::to_string(&self.snapshot()?)
            .map_err(|e| SimulationError::Serialization(format!("Failed to serialize state: {}", e)))
    }

    /// Resume a run from [`Scheduler::save_state`] output
    ///
    /// `config` must be the config the checkpoint was taken with.
    pub fn load_state(config: SchedulerConfig, json: &str) -> Result<Self, SimulationError> {
        let snapshot: StateSnapshot = serde_json::from_str(json)
            .map_err(|e| SimulationError::Serialization(format!("Failed to parse state: {}", e)))?;
        Self::from_snapshot(config, snapshot)
    }

    /// Rebuild a scheduler from a validated snapshot
    ///
    /// The event log restarts empty.
    pub fn from_snapshot(
        config: SchedulerConfig,
        snapshot: StateSnapshot,
    ) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let expected = compute_config_hash(&config)?;
        if snapshot.config_hash != expected {
            return Err(SimulationError::ConfigMismatch {
                expected,
                found: snapshot.config_hash,
            });
        }
        validate_snapshot(&snapshot, &config)?;

        let mut known_patients = BTreeSet::new();
        let mut queues = BTreeMap::new();
        for queue in snapshot.queues {
            known_patients.extend(queue.entries.iter().map(|e| e.patient.id()));
            queues.insert(queue.specialty, PriorityQueue::from_entries(queue.entries));
        }
        let router = AdmissionRouter::from_queues(queues)?;

        let mut stats = StatisticsCollector::new();
        let mut history = BTreeMap::new();
        let mut servers = Vec::with_capacity(snapshot.servers.len());
        for server_snapshot in snapshot.servers {
            let (server, records) = server_snapshot.into_parts();
            if let Some(patient) = server.current_patient() {
                known_patients.insert(patient.id());
            }
            stats.register_server(&server);
            history.insert(server.id(), records);
            servers.push(server);
        }
        servers.sort_by_key(Server::id);

        for patient in snapshot.completed {
            known_patients.insert(patient.id());
            stats.record(patient)?;
        }
        known_patients.extend(snapshot.pending.iter().map(Patient::id));

        Ok(Self {
            clock: SimClock::at_tick(config.step, config.total_duration, snapshot.tick),
            rng: RngManager::new(snapshot.rng_state),
            router,
            servers,
            pending: snapshot.pending,
            stats,
            history,
            event_log: EventLog::new(),
            known_patients,
            forced_completions: snapshot.forced_completions,
            finished: snapshot.finished,
            config,
        })
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("tick", &self.clock.current_tick())
            .field("time", &self.clock.now())
            .field("servers", &self.servers.len())
            .field("queued", &self.router.total_queued())
            .field("pending", &self.pending.len())
            .field("completed", &self.stats.len())
            .field("finished", &self.finished)
            .finish()
    }
}
