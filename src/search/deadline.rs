//! Remaining-time sources polled by the search for cooperative cancellation.
//!
//! The harness owns the clock for a turn and lends it to the engine; search
//! code only ever asks how many milliseconds are left.

use std::time::{Duration, Instant};

pub trait Deadline {
    /// Milliseconds left in the current turn. May go negative once expired.
    fn time_left_ms(&self) -> f64;
}

impl<F: Fn() -> f64> Deadline for F {
    fn time_left_ms(&self) -> f64 {
        self()
    }
}

/// Wall clock for a single turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    started_at: Instant,
    budget: Duration,
}

impl TurnClock {
    pub fn start(budget: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            budget,
        }
    }

    pub fn start_ms(budget_ms: u64) -> Self {
        Self::start(Duration::from_millis(budget_ms))
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn is_expired(&self) -> bool {
        self.time_left_ms() <= 0.0
    }
}

impl Deadline for TurnClock {
    fn time_left_ms(&self) -> f64 {
        let budget_ms = self.budget.as_secs_f64() * 1000.0;
        budget_ms - self.elapsed().as_secs_f64() * 1000.0
    }
}

/// A deadline that never arrives. Fixed-depth searches and benches only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl Deadline for Unlimited {
    fn time_left_ms(&self) -> f64 {
        f64::INFINITY
    }
}
