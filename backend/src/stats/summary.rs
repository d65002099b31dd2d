//! Summary types produced by the statistics collector

use crate::core::time::SimTime;
use crate::models::server::ServerId;
use crate::models::specialty::Specialty;
use serde::{Deserialize, Serialize};

/// Wait-time distribution over completed patients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitStats {
    pub mean: SimTime,
    pub min: SimTime,
    pub max: SimTime,
}

/// Count and mean wait for a group of patients
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupStats {
    pub count: usize,
    /// 0.0 when `count` is 0
    pub mean_wait: SimTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityStats {
    pub severity: u8,
    #[serde(flatten)]
    pub stats: GroupStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyStats {
    pub specialty: Specialty,
    #[serde(flatten)]
    pub stats: GroupStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStats {
    pub id: ServerId,
    pub name: String,
    pub specialty: Specialty,
    pub completed: usize,
    /// 0.0 when nothing was completed
    pub mean_service_duration: SimTime,
}

/// Aggregates over every completed patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_completed: usize,

    /// `None` when no completed patient has a wait time
    pub wait: Option<WaitStats>,

    /// Always severities 1 through 5, in order
    pub by_severity: Vec<SeverityStats>,

    /// Only specialties with at least one completed patient, in specialty order
    pub by_specialty: Vec<SpecialtyStats>,

    /// Every registered server, by ascending id
    pub by_server: Vec<ServerStats>,
}

impl Summary {
    /// Stats for one severity level, if in range
    pub fn severity(&self, severity: u8) -> Option<&GroupStats> {
        self.by_severity
            .iter()
            .find(|s| s.severity == severity)
            .map(|s| &s.stats)
    }

    pub fn specialty(&self, specialty: Specialty) -> Option<&GroupStats> {
        self.by_specialty
            .iter()
            .find(|s| s.specialty == specialty)
            .map(|s| &s.stats)
    }

    pub fn server(&self, id: ServerId) -> Option<&ServerStats> {
        self.by_server.iter().find(|s| s.id == id)
    }
}

/// End-of-run report handed to the reporting layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub summary: Summary,
    pub total_duration: SimTime,
    /// Completed patients per time unit (0.0 for a zero-length run)
    pub throughput: f64,
    /// Patients still waiting in a queue
    pub still_queued: usize,
    /// Patients whose arrival time was never reached
    pub pending_arrivals: usize,
    /// Services closed early by the end-of-run drain
    pub forced_completions: usize,
}
