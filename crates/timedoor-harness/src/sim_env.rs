//! Virtual-clock environment.
//!
//! `SimEnv` never waits. A sleep computes its wake time when it is created,
//! moves the shared virtual clock forward to that time if it is not there
//! yet, and completes immediately. Concurrent sleeps therefore overlap the
//! way real ones do: the clock ends at the latest wake time, not at the sum
//! of the durations.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use timedoor_core::Environment;

/// Environment with a manually advanced clock.
///
/// Clones share the same clock.
#[derive(Debug, Clone)]
pub struct SimEnv {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl SimEnv {
    /// Create a clock at virtual time zero.
    pub fn new() -> Self {
        Self { origin: Instant::now(), offset: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Move the clock forward.
    pub fn advance(&self, duration: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset = offset.saturating_add(duration);
    }

    /// Move the clock forward to `target`. Never moves it backwards.
    pub fn advance_to(&self, target: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset = (*offset).max(target);
    }

    /// Virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for SimEnv {
    fn now(&self) -> Instant {
        let offset = self.elapsed();
        self.origin.checked_add(offset).unwrap_or(self.origin)
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        let wake = self.elapsed().saturating_add(duration);
        self.advance_to(wake);
        std::future::ready(())
    }
}
