//! Statistics over completed patients
//!
//! Every aggregate is recomputed from the append-only completed-patient list
//! on each call. Nothing is cached, so a summary can never drift from the
//! records it describes.

pub mod collector;
pub mod summary;

pub use collector::{ServerInfo, StatisticsCollector, StatsError};
pub use summary::{
    FinalReport, GroupStats, ServerStats, SeverityStats, SpecialtyStats, Summary, WaitStats,
};
