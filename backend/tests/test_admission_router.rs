//! Admission router tests
//!
//! The router resolves a missing specialty exactly once and files the patient
//! in the queue for that specialty.

use triage_simulator_core_rs::{AdmissionRouter, Patient, RngManager, Specialty};

#[test]
fn test_severity_one_goes_to_emergency() {
    let mut router = AdmissionRouter::new();
    let mut rng = RngManager::new(1);

    let admission = router
        .admit(Patient::new(1, "A".to_string(), 1, 0.0), &mut rng)
        .unwrap();
    assert_eq!(admission.specialty, Specialty::Emergency);
    assert!(admission.triaged);
}

#[test]
fn test_severity_two_goes_to_cardiology_or_neurology() {
    let mut router = AdmissionRouter::new();
    let mut rng = RngManager::new(31);

    for id in 0..40 {
        let admission = router
            .admit(Patient::new(id, "A".to_string(), 2, 0.0), &mut rng)
            .unwrap();
        assert!(matches!(
            admission.specialty,
            Specialty::Cardiology | Specialty::Neurology
        ));
    }

    let cardiology = router.queue(Specialty::Cardiology).unwrap().len();
    let neurology = router.queue(Specialty::Neurology).unwrap().len();
    assert_eq!(cardiology + neurology, 40);
    assert!(cardiology > 0 && neurology > 0);
}

#[test]
fn test_mild_severities_go_to_general_practice() {
    let mut router = AdmissionRouter::new();
    let mut rng = RngManager::new(1);

    for severity in 3..=5 {
        let admission = router
            .admit(
                Patient::new(severity as u64, "A".to_string(), severity, 0.0),
                &mut rng,
            )
            .unwrap();
        assert_eq!(admission.specialty, Specialty::GeneralPractice);
    }
    assert_eq!(router.queue(Specialty::GeneralPractice).unwrap().len(), 3);
}

#[test]
fn test_resolved_specialty_is_persisted_on_patient() {
    let mut router = AdmissionRouter::new();
    let mut rng = RngManager::new(1);

    router
        .admit(Patient::new(8, "A".to_string(), 4, 0.0), &mut rng)
        .unwrap();

    let queued = router
        .queue_mut(Specialty::GeneralPractice)
        .unwrap()
        .extract_min()
        .unwrap();
    assert_eq!(queued.id(), 8);
    assert_eq!(queued.specialty(), Some(Specialty::GeneralPractice));
}

#[test]
fn test_preassigned_specialty_overrides_triage() {
    let mut router = AdmissionRouter::new();
    let mut rng = RngManager::new(1);
    let state_before = rng.get_state();

    let admission = router
        .admit(
            Patient::new(1, "A".to_string(), 2, 0.0).with_specialty(Specialty::Ophthalmology),
            &mut rng,
        )
        .unwrap();

    assert_eq!(admission.specialty, Specialty::Ophthalmology);
    assert!(!admission.triaged);
    // No coin flip for pre-assigned patients
    assert_eq!(rng.get_state(), state_before);
}

#[test]
fn test_admission_key_uses_patient_arrival() {
    let mut router = AdmissionRouter::new();
    let mut rng = RngManager::new(1);

    let admission = router
        .admit(Patient::new(1, "A".to_string(), 3, 42.5), &mut rng)
        .unwrap();
    assert_eq!(admission.key.severity, 3);
    assert_eq!(admission.key.arrival_time, 42.5);
}

#[test]
fn test_queue_sizes_cover_every_specialty() {
    let mut router = AdmissionRouter::new();
    let mut rng = RngManager::new(1);
    router
        .admit(Patient::new(1, "A".to_string(), 1, 0.0), &mut rng)
        .unwrap();

    let sizes = router.queue_sizes();
    assert_eq!(sizes.len(), Specialty::ALL.len());
    assert!(sizes.contains(&(Specialty::Emergency, 1)));
    assert_eq!(router.total_queued(), 1);
}
