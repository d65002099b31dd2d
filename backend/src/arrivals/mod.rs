//! Arrival generation for demo runs and tests.
//!
//! Produces random patients and server rosters. All generation flows through
//! [`RngManager`], so the same seed always yields the same inputs.
//!
//! # Example
//!
//! ```
//! use triage_simulator_core_rs::arrivals::{generate_patients, generate_servers, ArrivalConfig};
//! use triage_simulator_core_rs::rng::RngManager;
//!
//! let mut rng = RngManager::new(42);
//! let patients = generate_patients(&ArrivalConfig::default(), &mut rng);
//! let servers = generate_servers(4, &mut rng);
//!
//! assert_eq!(patients.len(), 20);
//! assert_eq!(servers.len(), 4);
//! assert!(patients.iter().all(|p| (1..=5).contains(&p.severity())));
//! ```

use crate::core::time::SimTime;
use crate::models::patient::{Patient, MAX_SEVERITY, MIN_SEVERITY};
use crate::models::specialty::Specialty;
use crate::rng::RngManager;
use crate::scheduler::ServerConfig;
use serde::{Deserialize, Serialize};

const FIRST_NAMES: [&str; 12] = [
    "Alex", "Bea", "Caio", "Dana", "Elias", "Fern", "Gus", "Hana", "Ivo", "Jade", "Kai", "Lena",
];

const LAST_NAMES: [&str; 6] = ["Moreau", "Okafor", "Lindqvist", "Tanaka", "Ruiz", "Haddad"];

const SERVER_NAMES: [&str; 8] = [
    "Dr. Abara", "Dr. Brandt", "Dr. Cho", "Dr. Duarte", "Dr. Ekdahl", "Dr. Farah", "Dr. Greer",
    "Dr. Hollis",
];

/// Shortest and longest generated mean service duration (inclusive)
pub const SERVICE_DURATION_RANGE: (i64, i64) = (15, 45);

/// Configuration for random patient generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrivalConfig {
    /// Number of patients to generate
    pub count: usize,

    /// Arrival times are drawn uniformly from `[0, arrival_window)`.
    /// Zero puts every patient at time 0.
    pub arrival_window: SimTime,

    /// Probability that a patient arrives without a specialty and must be triaged
    pub unspecified_probability: f64,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            count: 20,
            arrival_window: 0.0,
            unspecified_probability: 0.3,
        }
    }
}

/// Generate `config.count` patients with ids `1..=count`
///
/// Returned in id order; arrival times are not sorted.
pub fn generate_patients(config: &ArrivalConfig, rng: &mut RngManager) -> Vec<Patient> {
    (1..=config.count as u64)
        .map(|id| {
            let name = random_name(rng);
            let severity = rng.range(MIN_SEVERITY as i64, MAX_SEVERITY as i64 + 1) as u8;
            let arrival_time = if config.arrival_window > 0.0 {
                rng.uniform(0.0, config.arrival_window)
            } else {
                0.0
            };

            let patient = Patient::new(id, name, severity, arrival_time);
            if rng.chance(config.unspecified_probability) {
                patient
            } else {
                match rng.choose(&Specialty::ALL) {
                    Some(&specialty) => patient.with_specialty(specialty),
                    None => patient,
                }
            }
        })
        .collect()
}

/// Generate `count` server configs with ids `1..=count`
///
/// Specialties are drawn uniformly, so some specialties may end up with no
/// server at all.
pub fn generate_servers(count: usize, rng: &mut RngManager) -> Vec<ServerConfig> {
    let (min, max) = SERVICE_DURATION_RANGE;
    (1..=count as u64)
        .map(|id| ServerConfig {
            id,
            name: rng.choose(&SERVER_NAMES).copied().unwrap_or("Dr. Doe").to_string(),
            specialty: rng
                .choose(&Specialty::ALL)
                .copied()
                .unwrap_or(Specialty::GeneralPractice),
            mean_service_duration: rng.range(min, max + 1) as SimTime,
        })
        .collect()
}

fn random_name(rng: &mut RngManager) -> String {
    let first = rng.choose(&FIRST_NAMES).copied().unwrap_or("Pat");
    let last = rng.choose(&LAST_NAMES).copied().unwrap_or("Doe");
    format!("{} {}", first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_window_puts_everyone_at_time_zero() {
        let mut rng = RngManager::new(3);
        let patients = generate_patients(&ArrivalConfig::default(), &mut rng);
        assert!(patients.iter().all(|p| p.arrival_time() == 0.0));
    }

    #[test]
    fn test_probability_one_leaves_every_specialty_unset() {
        let mut rng = RngManager::new(3);
        let config = ArrivalConfig {
            unspecified_probability: 1.0,
            ..ArrivalConfig::default()
        };
        let patients = generate_patients(&config, &mut rng);
        assert!(patients.iter().all(|p| p.specialty().is_none()));
    }

    #[test]
    fn test_server_durations_in_range() {
        let mut rng = RngManager::new(11);
        for server in generate_servers(50, &mut rng) {
            assert!((15.0..=45.0).contains(&server.mean_service_duration));
            assert_eq!(server.mean_service_duration.fract(), 0.0);
        }
    }
}
