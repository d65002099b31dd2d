//! Time management for the simulation
//!
//! The simulation operates in discrete ticks of a fixed step size. The clock
//! is pure simulation time: nothing in the core ever sleeps or reads the wall
//! clock, so a full run completes as fast as the CPU allows.
//!
//! The current time is always derived as `tick * step` rather than accumulated,
//! so fractional step sizes do not drift over long runs.

use serde::{Deserialize, Serialize};

/// Simulation time, in abstract time units (minutes in the demo CLI)
pub type SimTime = f64;

/// Tolerance used when comparing derived clock values against service deadlines
pub const TIME_EPSILON: SimTime = 1e-9;

/// Manages simulation time in discrete ticks
///
/// # Example
/// ```
/// use triage_simulator_core_rs::SimClock;
///
/// let mut clock = SimClock::new(1.0, 30.0);
/// assert_eq!(clock.current_tick(), 0);
/// assert_eq!(clock.now(), 0.0);
///
/// clock.advance_tick();
/// assert_eq!(clock.current_tick(), 1);
/// assert_eq!(clock.now(), 1.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Ticks elapsed since simulation start
    current_tick: usize,
    /// Simulation time advanced per tick
    step: SimTime,
    /// Time at which the run terminates
    total_duration: SimTime,
}

impl SimClock {
    /// Create a new clock at time zero
    ///
    /// # Panics
    /// Panics if `step` is not positive or `total_duration` is negative.
    pub fn new(step: SimTime, total_duration: SimTime) -> Self {
        assert!(step > 0.0 && step.is_finite(), "step must be positive");
        assert!(
            total_duration >= 0.0 && total_duration.is_finite(),
            "total_duration must be non-negative"
        );
        Self {
            current_tick: 0,
            step,
            total_duration,
        }
    }

    /// Restore a clock at a given tick (checkpoint resume)
    pub fn at_tick(step: SimTime, total_duration: SimTime, tick: usize) -> Self {
        let mut clock = Self::new(step, total_duration);
        clock.current_tick = tick;
        clock
    }

    /// Advance time by one step
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Ticks elapsed since start
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Current simulation time
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::SimClock;
    ///
    /// let mut clock = SimClock::new(0.5, 10.0);
    /// for _ in 0..3 {
    ///     clock.advance_tick();
    /// }
    /// assert_eq!(clock.now(), 1.5);
    /// ```
    pub fn now(&self) -> SimTime {
        self.current_tick as SimTime * self.step
    }

    pub fn step(&self) -> SimTime {
        self.step
    }

    pub fn total_duration(&self) -> SimTime {
        self.total_duration
    }

    /// True once the clock has reached the configured total duration
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::SimClock;
    ///
    /// let mut clock = SimClock::new(1.0, 2.0);
    /// assert!(!clock.is_complete());
    /// clock.advance_tick();
    /// clock.advance_tick();
    /// assert!(clock.is_complete());
    /// ```
    pub fn is_complete(&self) -> bool {
        self.now() + TIME_EPSILON >= self.total_duration
    }
}
