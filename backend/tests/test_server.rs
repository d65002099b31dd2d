//! Tests for the Server state machine
//!
//! Critical invariant: busy if and only if a patient is bound.

use triage_simulator_core_rs::{Patient, PatientError, Server, ServerError, Specialty};

fn patient(id: u64, severity: u8, arrival: f64) -> Patient {
    Patient::new(id, format!("P{}", id), severity, arrival).with_specialty(Specialty::Pediatrics)
}

fn pediatrician() -> Server {
    Server::new(5, "Dr. Farah".to_string(), Specialty::Pediatrics, 15.0)
}

#[test]
fn test_new_server_is_idle() {
    let server = pediatrician();
    assert_eq!(server.id(), 5);
    assert_eq!(server.name(), "Dr. Farah");
    assert_eq!(server.specialty(), Specialty::Pediatrics);
    assert_eq!(server.mean_service_duration(), 15.0);
    assert!(!server.is_busy());
    assert_eq!(server.completed_count(), 0);
    assert_eq!(server.total_service_time(), 0.0);
}

#[test]
fn test_busy_iff_bound_patient() {
    let mut server = pediatrician();
    assert_eq!(server.is_busy(), server.current_patient().is_some());

    server.start_service(patient(1, 2, 0.0), 3.0).unwrap();
    assert!(server.is_busy());
    assert_eq!(server.current_patient().map(|p| p.id()), Some(1));
    assert_eq!(server.service_started_at(), Some(3.0));
    assert_eq!(
        server.current_patient().and_then(|p| p.service_start()),
        server.service_started_at()
    );

    server.finish_service(18.0).unwrap();
    assert!(!server.is_busy());
    assert!(server.current_patient().is_none());
    assert!(server.service_started_at().is_none());
}

#[test]
fn test_cumulative_statistics() {
    let mut server = pediatrician();

    server.start_service(patient(1, 3, 0.0), 0.0).unwrap();
    server.finish_service(15.0).unwrap();
    server.start_service(patient(2, 3, 0.0), 15.0).unwrap();
    // Forced early finish counts actual elapsed time
    server.finish_service(20.0).unwrap();

    assert_eq!(server.completed_count(), 2);
    assert_eq!(server.total_service_time(), 20.0);
}

#[test]
fn test_remaining_time_counts_down() {
    let mut server = pediatrician();
    server.start_service(patient(1, 1, 0.0), 10.0).unwrap();

    assert_eq!(server.remaining_time(10.0), 15.0);
    assert_eq!(server.remaining_time(20.0), 5.0);
    assert_eq!(server.remaining_time(25.0), 0.0);
    assert_eq!(server.remaining_time(99.0), 0.0);
}

#[test]
fn test_already_busy_leaves_state_untouched() {
    let mut server = pediatrician();
    server.start_service(patient(1, 1, 0.0), 0.0).unwrap();

    let err = server.start_service(patient(2, 1, 0.0), 1.0).unwrap_err();
    assert_eq!(err, ServerError::AlreadyBusy(5));
    assert_eq!(server.current_patient().map(|p| p.id()), Some(1));
    assert_eq!(server.service_started_at(), Some(0.0));
}

#[test]
fn test_not_busy_error() {
    let mut server = pediatrician();
    assert_eq!(server.finish_service(0.0), Err(ServerError::NotBusy(5)));
}

#[test]
fn test_patient_already_in_service_rejected() {
    let mut first = pediatrician();
    first.start_service(patient(1, 1, 0.0), 0.0).unwrap();
    let served = first.finish_service(15.0).unwrap();

    let mut second = Server::new(6, "Dr. Greer".to_string(), Specialty::Pediatrics, 15.0);
    assert_eq!(
        second.start_service(served, 20.0),
        Err(ServerError::Patient(PatientError::ServiceAlreadyStarted(1)))
    );
    assert!(!second.is_busy());
}

#[test]
fn test_check_start_rejects_served_patient_without_taking_it() {
    let mut first = pediatrician();
    first.start_service(patient(1, 1, 0.0), 0.0).unwrap();
    let served = first.finish_service(15.0).unwrap();

    let second = Server::new(6, "Dr. Greer".to_string(), Specialty::Pediatrics, 15.0);
    assert_eq!(
        second.check_start(&served),
        Err(ServerError::Patient(PatientError::ServiceAlreadyStarted(1)))
    );
    // Still owned here, untouched
    assert_eq!(served.departure(), Some(15.0));
    assert_eq!(served.served_by(), Some(5));
    assert!(!second.is_busy());
}

#[test]
#[should_panic(expected = "mean_service_duration must be positive")]
fn test_negative_duration_panics() {
    Server::new(1, "S".to_string(), Specialty::Emergency, -5.0);
}
