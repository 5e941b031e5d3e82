//! Timer callback contract and one-shot registrations.
//!
//! A [`Timer`] accepts a delay and a [`TimerClient`] and notifies the client
//! once the delay has elapsed. Every call to [`Timer::schedule`] produces its
//! own [`Registration`], which carries the target and the completion channel
//! for that call alone. Nothing about a registration is stored in shared timer
//! state, so concurrent registrations never clobber each other.
//!
//! ## One-shot delivery
//!
//! [`Registration::fire`] consumes the registration. A registration can
//! therefore notify its client at most once, whatever the timer driver does.
//!
//! ## Outcomes
//!
//! The result of the client's `notify` is delivered to the [`TimerHandle`]
//! returned by `schedule`. Callers that care about background faults await
//! the handle; callers that don't simply drop it. Dropping the handle never
//! cancels the callback.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::error::DoorError;

/// Receiver of timer notifications.
pub trait TimerClient: Send + Sync {
    /// Called once when a registration's delay has elapsed.
    fn notify(&self) -> Result<(), DoorError>;
}

/// Schedules one-shot notifications.
///
/// # Errors
///
/// Implementations MUST reject, synchronously and without notifying:
///
/// - a negative `delay`
/// - a `client` with no live owner
///
/// [`Registration::new`] performs both checks.
pub trait Timer: Send + Sync {
    /// Notify `client` once, after `delay` units.
    ///
    /// The timer keeps only a weak reference: a client dropped before the
    /// delay elapses is skipped.
    fn schedule(
        &self,
        delay: i64,
        client: Weak<dyn TimerClient>,
    ) -> Result<TimerHandle, DoorError>;
}

/// Downgrade a concrete client into the form [`Timer::schedule`] accepts.
pub fn downgrade_client<C: TimerClient + 'static>(client: &Arc<C>) -> Weak<dyn TimerClient> {
    let weak: Weak<C> = Arc::downgrade(client);
    weak
}

/// Timing configuration for time-based timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Wall-clock length of one delay unit.
    pub tick: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { tick: Duration::from_secs(1) }
    }
}

impl TimerConfig {
    /// Wall-clock duration of `units` ticks.
    ///
    /// Fails with [`DoorError::InvalidArgument`] only if the product does not
    /// fit in a [`Duration`].
    pub fn delay_for(&self, units: u64) -> Result<Duration, DoorError> {
        const NANOS_PER_SEC: u128 = 1_000_000_000;

        self.tick
            .as_nanos()
            .checked_mul(u128::from(units))
            .and_then(|nanos| {
                let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
                let subsec = u32::try_from(nanos % NANOS_PER_SEC).ok()?;
                Some(Duration::new(secs, subsec))
            })
            .ok_or_else(|| DoorError::invalid_argument(format!("delay of {units} ticks overflows")))
    }
}

/// A single validated timer registration.
///
/// Created by timer implementations inside `schedule`, then held until the
/// delay has elapsed and consumed by [`Registration::fire`].
pub struct Registration {
    delay: u64,
    client: Weak<dyn TimerClient>,
    completion: oneshot::Sender<Result<(), DoorError>>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("delay", &self.delay)
            .field("client_alive", &(self.client.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

impl Registration {
    /// Validate arguments and create a registration plus its caller handle.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `delay` is negative
    /// - `InvalidArgument` if `client` has no live owner
    pub fn new(
        delay: i64,
        client: Weak<dyn TimerClient>,
    ) -> Result<(Self, TimerHandle), DoorError> {
        let delay = u64::try_from(delay)
            .map_err(|_| DoorError::invalid_argument(format!("negative delay: {delay}")))?;

        if client.strong_count() == 0 {
            return Err(DoorError::invalid_argument("timer client is gone"));
        }

        let (completion, outcome) = oneshot::channel();
        let handle = TimerHandle { outcome, resolved: None };

        Ok((Self { delay, client, completion }, handle))
    }

    /// Delay in units, as validated.
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Notify the client and deliver the outcome to the handle.
    ///
    /// A client dropped since registration is skipped and the outcome is
    /// `Ok(())`.
    pub fn fire(self) -> Result<(), DoorError> {
        let outcome = match self.client.upgrade() {
            Some(client) => client.notify(),
            None => {
                tracing::debug!(delay = self.delay, "timer client dropped before firing");
                Ok(())
            },
        };

        match &outcome {
            Ok(()) => tracing::debug!(delay = self.delay, "timer fired"),
            Err(e) if e.is_fault() => tracing::warn!(delay = self.delay, "timer fired: {}", e),
            Err(e) => tracing::debug!(delay = self.delay, "timer callback failed: {}", e),
        }

        // Receiver may already be gone (fire-and-forget caller)
        let _ = self.completion.send(outcome.clone());

        outcome
    }
}

/// Caller side of a registration.
///
/// Resolves to the outcome of the client's `notify`, or to
/// [`DoorError::TimerDropped`] if the registration was discarded unfired.
#[derive(Debug)]
pub struct TimerHandle {
    outcome: oneshot::Receiver<Result<(), DoorError>>,
    resolved: Option<Result<(), DoorError>>,
}

impl TimerHandle {
    /// Wait for the callback outcome.
    pub async fn join(self) -> Result<(), DoorError> {
        if let Some(outcome) = self.resolved {
            return outcome;
        }
        self.outcome.await.unwrap_or(Err(DoorError::TimerDropped))
    }

    /// Poll for the callback outcome without waiting.
    ///
    /// Returns `None` while the registration is still pending. Once resolved,
    /// every later call returns the same outcome.
    pub fn try_join(&mut self) -> Option<Result<(), DoorError>> {
        if self.resolved.is_none() {
            self.resolved = match self.outcome.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(Err(DoorError::TimerDropped)),
            };
        }
        self.resolved.clone()
    }
}
