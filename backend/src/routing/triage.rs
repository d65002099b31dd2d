//! Severity-based triage rule
//!
//! A deliberately coarse placeholder, not a medical algorithm:
//!
//! | Severity | Specialty                                   |
//! |----------|---------------------------------------------|
//! | 1        | Emergency                                   |
//! | 2        | Cardiology or Neurology (uniform choice)    |
//! | 3–5      | General practice                            |

use crate::models::specialty::Specialty;
use crate::rng::RngManager;

const SEVERITY_TWO_SPECIALTIES: [Specialty; 2] = [Specialty::Cardiology, Specialty::Neurology];

/// Infer the specialty a patient needs from their severity
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{routing::triage_specialty, RngManager, Specialty};
///
/// let mut rng = RngManager::new(1);
/// assert_eq!(triage_specialty(1, &mut rng), Specialty::Emergency);
/// assert_eq!(triage_specialty(4, &mut rng), Specialty::GeneralPractice);
/// ```
pub fn triage_specialty(severity: u8, rng: &mut RngManager) -> Specialty {
    match severity {
        1 => Specialty::Emergency,
        2 => rng
            .choose(&SEVERITY_TWO_SPECIALTIES)
            .copied()
            .unwrap_or(Specialty::Cardiology),
        _ => Specialty::GeneralPractice,
    }
}
