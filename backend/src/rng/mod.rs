//! Deterministic random number generation
//!
//! All randomness in the simulator (triage coin flips, generated patients and
//! servers) goes through [`RngManager`], so a fixed seed and fixed inputs
//! always replay the same run.

mod xorshift;

pub use xorshift::RngManager;
