//! xorshift64* random number generator
//!
//! Small, fast and fully deterministic. The whole generator state is a single
//! `u64`, which makes it trivial to checkpoint and restore mid-run.

use serde::{Deserialize, Serialize};

/// Seeded xorshift64* generator
///
/// # Example
/// ```
/// use triage_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let severity = rng.range(1, 6); // [1, 6)
/// assert!((1..6).contains(&severity));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new generator from a seed (zero is mapped to one)
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Next raw 64-bit value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform integer in `[min, max)`
    ///
    /// # Panics
    /// Panics if `min >= max`
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");
        let span = max.abs_diff(min);
        min.wrapping_add((self.next() % span) as i64)
    }

    /// Uniform float in `[0.0, 1.0)`
    pub fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform float in `[min, max)`
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        assert!(min < max, "min must be less than max");
        min + self.next_f64() * (max - min)
    }

    /// Bernoulli trial: true with probability `p`
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// assert!(!rng.chance(0.0));
    /// assert!(rng.chance(1.0));
    /// ```
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniformly pick one element of a slice (`None` if empty)
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.range(0, items.len() as i64) as usize;
        items.get(index)
    }

    /// Current internal state, for checkpointing
    ///
    /// `RngManager::new(rng.get_state())` resumes the exact same sequence.
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
