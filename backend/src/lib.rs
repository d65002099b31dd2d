//! Triage Simulator Core - Rust Engine
//!
//! Time-stepped patient admission simulator with deterministic execution.
//! Patients are queued per specialty by clinical priority and matched to idle
//! specialists on every tick.
//!
//! # Architecture
//!
//! - **core**: Simulation clock
//! - **models**: Domain types (Patient, Server, Specialty, Event)
//! - **queue**: Priority queue of waiting patients
//! - **routing**: Triage rule and per-specialty admission
//! - **scheduler**: Main simulation loop and checkpointing
//! - **stats**: Completed-patient aggregation
//! - **reporting**: Read-only status snapshots
//! - **arrivals**: Random patient and server generation
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Lower severity is served first; ties break on arrival, then insertion
//! 2. All randomness is deterministic (seeded RNG)
//! 3. A server holds at most one patient, and none after the final drain

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod queue;
pub mod reporting;
pub mod rng;
pub mod routing;
pub mod scheduler;
pub mod stats;

// Re-exports for convenience
pub use crate::core::time::{SimClock, SimTime};
pub use models::{
    event::{Event, EventLog},
    patient::{Patient, PatientError, PatientId},
    server::{Server, ServerError, ServerId},
    specialty::Specialty,
};
pub use queue::{PriorityKey, PriorityQueue, QueueError};
pub use reporting::{CollectingReporter, StatusReporter, StatusSnapshot, TracingReporter};
pub use rng::RngManager;
pub use routing::{AdmissionRouter, RoutingError};
pub use scheduler::{
    Scheduler, SchedulerConfig, ServerConfig, ServiceRecord, SimulationError, TickResult,
};
pub use stats::{FinalReport, StatisticsCollector, StatsError, Summary};
