//! Deterministic timer driven by explicit ticks.
//!
//! Registrations never fire on their own. [`ManualTimer::advance`] moves the
//! timer's tick counter and fires every registration that has come due, in
//! due order and then registration order. Firing happens after the timer's
//! lock is released, so callbacks may schedule again.

use std::sync::{Mutex, MutexGuard, PoisonError, Weak};

use timedoor_core::{DoorError, Registration, Timer, TimerClient, TimerHandle};

struct Pending {
    due: u64,
    seq: u64,
    registration: Registration,
}

#[derive(Default)]
struct ManualState {
    now: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Timer advanced by hand, one tick per delay unit.
#[derive(Default)]
pub struct ManualTimer {
    state: Mutex<ManualState>,
}

impl ManualTimer {
    /// Create a timer at tick zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick.
    pub fn now(&self) -> u64 {
        self.lock().now
    }

    /// Number of registrations not yet fired.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Advance by `ticks` and fire everything due, returning the outcomes in
    /// firing order.
    ///
    /// `advance(0)` fires zero-delay registrations made since the last
    /// advance.
    pub fn advance(&self, ticks: u64) -> Vec<Result<(), DoorError>> {
        let mut due = {
            let mut state = self.lock();
            state.now = state.now.saturating_add(ticks);
            let now = state.now;

            let (due, waiting): (Vec<_>, Vec<_>) =
                std::mem::take(&mut state.pending).into_iter().partition(|p| p.due <= now);
            state.pending = waiting;
            due
        };

        due.sort_by_key(|p| (p.due, p.seq));
        tracing::debug!(fired = due.len(), "manual timer advanced by {} ticks", ticks);

        due.into_iter().map(|p| p.registration.fire()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Timer for ManualTimer {
    fn schedule(
        &self,
        delay: i64,
        client: Weak<dyn TimerClient>,
    ) -> Result<TimerHandle, DoorError> {
        let (registration, handle) = Registration::new(delay, client)?;

        let mut state = self.lock();
        let due = state.now.saturating_add(registration.delay());
        let seq = state.next_seq;
        state.next_seq = state.next_seq.wrapping_add(1);
        state.pending.push(Pending { due, seq, registration });

        Ok(handle)
    }
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ManualTimer")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}
