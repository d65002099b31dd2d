//! Checkpoint Tests - Save/Load Scheduler State
//!
//! Critical invariants tested:
//! - Determinism: a restored run finishes exactly like an uninterrupted one
//! - Patient conservation: no patient lost or duplicated across save/load
//! - Config matching: state from a different config is rejected

use triage_simulator_core_rs::arrivals::{generate_patients, ArrivalConfig};
use triage_simulator_core_rs::scheduler::{
    Scheduler, SchedulerConfig, ServerConfig, SimulationError,
};
use triage_simulator_core_rs::{Patient, RngManager, Specialty};

// ============================================================================
// Test Helpers
// ============================================================================

fn test_config(seed: u64) -> SchedulerConfig {
    let server = |id, specialty, mean| ServerConfig {
        id,
        name: format!("Dr. {}", id),
        specialty,
        mean_service_duration: mean,
    };
    SchedulerConfig {
        total_duration: 80.0,
        step: 1.0,
        report_interval: None,
        rng_seed: seed,
        servers: vec![
            server(1, Specialty::Emergency, 7.0),
            server(2, Specialty::Cardiology, 12.0),
            server(3, Specialty::Neurology, 9.0),
            server(4, Specialty::GeneralPractice, 5.0),
            server(5, Specialty::GeneralPractice, 11.0),
        ],
    }
}

/// Thirty patients with triaged specialties, arrivals spread over 0..=40.5
fn create_test_scheduler(seed: u64) -> Scheduler {
    let mut scheduler = Scheduler::new(test_config(seed)).unwrap();
    for id in 0..30u64 {
        let severity = (id % 5) as u8 + 1;
        let arrival = (id % 28) as f64 * 1.5;
        scheduler
            .schedule_arrival(Patient::new(id, format!("P{}", id), severity, arrival))
            .unwrap();
    }
    scheduler
}

fn completed_ids(scheduler: &Scheduler) -> Vec<u64> {
    scheduler.completed().iter().map(|p| p.id()).collect()
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_save_and_load_fresh_scheduler() {
    let scheduler = create_test_scheduler(42);
    let json = scheduler.save_state().unwrap();

    let restored = Scheduler::load_state(test_config(42), &json).unwrap();
    assert_eq!(restored.current_tick(), 0);
    assert_eq!(restored.pending_arrivals(), scheduler.pending_arrivals());
    assert_eq!(restored.total_queued(), scheduler.total_queued());
    assert_eq!(restored.known_patients(), 30);
}

#[test]
fn test_restored_run_matches_uninterrupted_run() {
    let mut uninterrupted = create_test_scheduler(7);
    let expected = uninterrupted.run().unwrap();

    let mut first_half = create_test_scheduler(7);
    for _ in 0..23 {
        first_half.tick().unwrap();
    }
    assert!(first_half.patients_in_service() > 0);
    let json = first_half.save_state().unwrap();

    let mut resumed = Scheduler::load_state(test_config(7), &json).unwrap();
    assert_eq!(resumed.current_tick(), 23);
    assert_eq!(resumed.completed(), first_half.completed());

    let report = resumed.run().unwrap();
    assert_eq!(report, expected);
    assert_eq!(completed_ids(&resumed), completed_ids(&uninterrupted));
    for server in uninterrupted.servers() {
        assert_eq!(resumed.history(server.id()), uninterrupted.history(server.id()));
    }
}

/// Generated arrivals carry full-precision fractional times; a fractional
/// step keeps every clock value off the integers
#[test]
fn test_resume_with_generated_fractional_arrivals() {
    let build = |seed: u64| {
        let mut config = test_config(seed);
        config.step = 0.7;
        let mut scheduler = Scheduler::new(config).unwrap();
        let mut rng = RngManager::new(seed);
        let arrivals = ArrivalConfig {
            count: 40,
            arrival_window: 60.0,
            unspecified_probability: 0.3,
        };
        for patient in generate_patients(&arrivals, &mut rng) {
            scheduler.schedule_arrival(patient).unwrap();
        }
        scheduler
    };

    for seed in [2, 6, 7, 9, 10] {
        let mut uninterrupted = build(seed);
        let expected = uninterrupted.run().unwrap();

        let mut first_part = build(seed);
        for _ in 0..3 {
            first_part.tick().unwrap();
        }
        let json = first_part.save_state().unwrap();

        let mut config = test_config(seed);
        config.step = 0.7;
        let mut resumed = Scheduler::load_state(config, &json).unwrap();
        assert_eq!(resumed.pending_arrivals(), first_part.pending_arrivals());

        let report = resumed.run().unwrap();
        assert_eq!(report, expected, "seed {}", seed);
        assert_eq!(resumed.completed(), uninterrupted.completed());
        for server in uninterrupted.servers() {
            assert_eq!(resumed.history(server.id()), uninterrupted.history(server.id()));
        }
    }
}

#[test]
fn test_restored_queue_keeps_tie_order() {
    let mut config = test_config(1);
    config.servers = vec![ServerConfig {
        id: 1,
        name: "Dr. 1".to_string(),
        specialty: Specialty::Emergency,
        mean_service_duration: 5.0,
    }];
    let mut scheduler = Scheduler::new(config.clone()).unwrap();
    for id in [4, 2, 9] {
        scheduler
            .admit(Patient::new(id, format!("P{}", id), 1, 0.0))
            .unwrap();
    }
    scheduler.tick().unwrap();

    let mut restored = Scheduler::load_state(config, &scheduler.save_state().unwrap()).unwrap();
    restored
        .admit(Patient::new(1, "Late".to_string(), 1, 0.0))
        .unwrap();
    restored.run().unwrap();

    assert_eq!(completed_ids(&restored), vec![4, 2, 9, 1]);
}

#[test]
fn test_event_log_not_persisted() {
    let mut scheduler = create_test_scheduler(3);
    for _ in 0..10 {
        scheduler.tick().unwrap();
    }
    assert!(!scheduler.event_log().is_empty());

    let restored =
        Scheduler::load_state(test_config(3), &scheduler.save_state().unwrap()).unwrap();
    assert!(restored.event_log().is_empty());
}

#[test]
fn test_finished_state_round_trip() {
    let mut scheduler = create_test_scheduler(5);
    scheduler.run().unwrap();

    let mut restored =
        Scheduler::load_state(test_config(5), &scheduler.save_state().unwrap()).unwrap();
    assert!(restored.is_finished());
    assert_eq!(restored.forced_completions(), scheduler.forced_completions());
    assert_eq!(restored.tick(), Err(SimulationError::SimulationFinished));
    assert_eq!(restored.final_report(), scheduler.final_report());
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_config_mismatch_rejected() {
    let scheduler = create_test_scheduler(42);
    let json = scheduler.save_state().unwrap();

    let err = Scheduler::load_state(test_config(43), &json).unwrap_err();
    assert!(matches!(err, SimulationError::ConfigMismatch { .. }));
}

#[test]
fn test_malformed_json_rejected() {
    let err = Scheduler::load_state(test_config(42), "{not json").unwrap_err();
    assert!(matches!(err, SimulationError::Serialization(_)));
}

#[test]
fn test_duplicated_patient_rejected() {
    let mut scheduler = create_test_scheduler(42);
    for _ in 0..5 {
        scheduler.tick().unwrap();
    }

    let mut snapshot = scheduler.snapshot().unwrap();
    let pending = snapshot.pending[0].clone();
    snapshot.pending.push(pending);

    let err = Scheduler::from_snapshot(test_config(42), snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidation(_)));
}

#[test]
fn test_missing_queue_rejected() {
    let scheduler = create_test_scheduler(42);
    let mut snapshot = scheduler.snapshot().unwrap();
    snapshot.queues.pop();

    let err = Scheduler::from_snapshot(test_config(42), snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidation(_)));
}

#[test]
fn test_patient_in_wrong_queue_rejected() {
    let mut scheduler = create_test_scheduler(42);
    for id in 100..103 {
        scheduler
            .admit(Patient::new(id, format!("P{}", id), 1, 0.0))
            .unwrap();
    }

    let mut snapshot = scheduler.snapshot().unwrap();
    let from = snapshot
        .queues
        .iter()
        .position(|q| q.specialty == Specialty::Emergency)
        .unwrap();
    let to = (from + 1) % snapshot.queues.len();
    let entry = snapshot.queues[from].entries.remove(0);
    snapshot.queues[to].entries.push(entry);

    let err = Scheduler::from_snapshot(test_config(42), snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidation(_)));
}

#[test]
fn test_unsorted_pending_arrivals_rejected() {
    let scheduler = create_test_scheduler(42);
    let mut snapshot = scheduler.snapshot().unwrap();
    assert!(snapshot.pending.len() > 1);
    snapshot.pending.reverse();

    let err = Scheduler::from_snapshot(test_config(42), snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidation(_)));
}

#[test]
fn test_incomplete_patient_in_completed_list_rejected() {
    let scheduler = create_test_scheduler(42);
    let mut snapshot = scheduler.snapshot().unwrap();
    snapshot
        .completed
        .push(Patient::new(999, "Ghost".to_string(), 3, 0.0));

    let err = Scheduler::from_snapshot(test_config(42), snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidation(_)));
}
