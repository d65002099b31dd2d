//! Scheduler - the simulation tick loop
//!
//! See `engine.rs` for the tick phases and `checkpoint.rs` for save/load.

pub mod checkpoint;
pub mod engine;

pub use engine::{
    Scheduler, SchedulerConfig, ServerConfig, ServiceRecord, SimulationError, TickResult,
};

pub use checkpoint::{QueueSnapshot, ServerSnapshot, StateSnapshot};
