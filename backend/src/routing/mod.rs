//! Admission routing
//!
//! Decides which specialty queue a newly admitted patient joins and files
//! them there.
//!
//! - [`triage`]: the fixed severity → specialty placeholder rule
//! - [`router`]: the per-specialty queue table and `admit`

pub mod router;
pub mod triage;

pub use router::{Admission, AdmissionRouter, RoutingError};
pub use triage::triage_specialty;
