//! Domain models for the triage simulator

pub mod event;
pub mod patient;
pub mod server;
pub mod specialty;

// Re-exports
pub use event::{Event, EventLog};
pub use patient::{Patient, PatientError, PatientId, MAX_SEVERITY, MIN_SEVERITY};
pub use server::{ActiveService, Server, ServerError, ServerId};
pub use specialty::Specialty;
