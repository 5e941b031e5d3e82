//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples timer drivers from system time. This
//! enables:
//!
//! - Deterministic Simulation: a virtual clock advances instantly, so timeout
//!   scenarios run without wall-clock waits.
//!
//! - Production Runtime: the tokio implementation uses real system time
//!   without any code changes to the door or timer logic.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Isolation: Implementations must not share global state

use std::time::{Duration, Instant};

/// Abstract environment providing time and async sleeping.
///
/// Door and adapter logic never touch the environment directly. Only timer
/// drivers use it to wait out a registration's delay.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: This method MUST return values that never decrease
    ///   within a single execution context.
    fn now(&self) -> Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait, and it should only be used
    /// by driver code (not door logic).
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Time elapsed since `earlier`, saturating at zero.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}
