//! Medical specialties
//!
//! A fixed, closed set. Every specialty owns exactly one waiting queue for the
//! lifetime of a run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Specialty a server practises and a patient requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    GeneralPractice,
    Cardiology,
    Orthopedics,
    Pediatrics,
    Emergency,
    Neurology,
    Pulmonology,
    Gynecology,
    Ophthalmology,
    Dermatology,
}

impl Specialty {
    /// Every specialty, in declaration order
    pub const ALL: [Specialty; 10] = [
        Specialty::GeneralPractice,
        Specialty::Cardiology,
        Specialty::Orthopedics,
        Specialty::Pediatrics,
        Specialty::Emergency,
        Specialty::Neurology,
        Specialty::Pulmonology,
        Specialty::Gynecology,
        Specialty::Ophthalmology,
        Specialty::Dermatology,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::GeneralPractice => "General Practice",
            Specialty::Cardiology => "Cardiology",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Emergency => "Emergency",
            Specialty::Neurology => "Neurology",
            Specialty::Pulmonology => "Pulmonology",
            Specialty::Gynecology => "Gynecology",
            Specialty::Ophthalmology => "Ophthalmology",
            Specialty::Dermatology => "Dermatology",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_unique_and_complete() {
        let mut all = Specialty::ALL.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 10);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Specialty::GeneralPractice).unwrap();
        assert_eq!(json, "\"general_practice\"");
    }
}
