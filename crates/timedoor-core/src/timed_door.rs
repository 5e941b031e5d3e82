//! Timed door
//!
//! A [`Door`] that raises [`DoorError::LeftOpen`] when it is still open after
//! its timeout.
//!
//! ## Responsibilities
//!
//! - State: Closed/Open, behind a single mutex shared with timer callbacks
//! - Arming: Register the owned adapter with the injected timer on every
//!   Closed→Open edge
//! - Assertion: Fault iff the door is open at the moment of the check
//!
//! ## Design
//!
//! - Constructor injection: the timer is passed in, never global
//! - Ownership: the door exclusively owns its adapter, the adapter holds a
//!   weak back-reference, the timer holds a weak reference to the adapter
//! - No cancellation: closing does not revoke the pending registration, the
//!   adapter re-checks the state when it fires
//! - Generations: every Closed→Open edge gets a fresh generation number.
//!   Rollback of a failed registration and storing of the alarm handle only
//!   act on their own generation, so a slow `open` can never undo or
//!   overwrite a newer one racing with it

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    adapter::DoorTimerAdapter,
    door::{Door, DoorState},
    error::DoorError,
    timer::{Timer, TimerHandle, downgrade_client},
};

/// Policy for repeated transitions (open on an open door, close on a closed
/// door).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Repeat transitions are silent no-ops and schedule nothing.
    #[default]
    Idempotent,

    /// Repeat transitions fail with [`DoorError::InvalidTransition`].
    Strict,
}

/// Door configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorConfig {
    /// Timeout in timer units. Must be positive.
    pub timeout: i64,
    /// Repeat-transition policy.
    pub policy: TransitionPolicy,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self { timeout: 5, policy: TransitionPolicy::default() }
    }
}

/// State plus the generation of the latest Closed→Open edge.
#[derive(Debug, Default)]
struct Latch {
    state: DoorState,
    generation: u64,
}

/// Most recent alarm handle, tagged with the generation that armed it.
#[derive(Debug, Default)]
struct Alarm {
    generation: u64,
    handle: Option<TimerHandle>,
}

/// Door that must not be left open past its timeout.
pub struct TimedDoor {
    /// Current state. The only state timer callbacks read.
    latch: Mutex<Latch>,
    /// Timeout in timer units, fixed at construction.
    timeout: i64,
    /// Repeat-transition policy.
    policy: TransitionPolicy,
    /// Injected timer.
    timer: Arc<dyn Timer>,
    /// Owned adapter, registered with the timer on open.
    adapter: Arc<DoorTimerAdapter<TimedDoor>>,
    /// Handle of the most recent registration.
    alarm: Mutex<Alarm>,
}

impl TimedDoor {
    /// Create a closed door with the default transition policy.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `timeout` is not positive.
    pub fn new(timeout: i64, timer: Arc<dyn Timer>) -> Result<Arc<Self>, DoorError> {
        Self::with_config(DoorConfig { timeout, ..Default::default() }, timer)
    }

    /// Create a closed door from a full configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `config.timeout` is not positive.
    pub fn with_config(config: DoorConfig, timer: Arc<dyn Timer>) -> Result<Arc<Self>, DoorError> {
        if config.timeout <= 0 {
            return Err(DoorError::InvalidConfiguration { timeout: config.timeout });
        }

        Ok(Arc::new_cyclic(|door| Self {
            latch: Mutex::new(Latch::default()),
            timeout: config.timeout,
            policy: config.policy,
            timer,
            adapter: Arc::new(DoorTimerAdapter::from_weak(door.clone())),
            alarm: Mutex::new(Alarm::default()),
        }))
    }

    /// Timeout in timer units, exactly as configured.
    pub fn timeout(&self) -> i64 {
        self.timeout
    }

    /// Configured repeat-transition policy.
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Current state.
    pub fn state(&self) -> DoorState {
        self.lock_latch().state
    }

    /// The adapter this door registers with its timer.
    pub fn adapter(&self) -> &Arc<DoorTimerAdapter<TimedDoor>> {
        &self.adapter
    }

    /// Take the handle of the most recent registration, if any.
    ///
    /// Earlier handles are dropped when the door is opened again; their
    /// callbacks still fire.
    pub fn take_alarm(&self) -> Option<TimerHandle> {
        self.lock_alarm().handle.take()
    }

    /// Move to `target`. Returns the generation after the edge, or `None`
    /// for an allowed no-op.
    fn transition(&self, target: DoorState) -> Result<Option<u64>, DoorError> {
        let mut latch = self.lock_latch();
        if latch.state == target {
            return match self.policy {
                TransitionPolicy::Idempotent => Ok(None),
                TransitionPolicy::Strict => Err(DoorError::InvalidTransition { state: target }),
            };
        }

        latch.state = target;
        if target.is_open() {
            latch.generation = latch.generation.wrapping_add(1);
        }
        Ok(Some(latch.generation))
    }

    /// Undo the open of `generation` unless the door has moved on since.
    fn roll_back(&self, generation: u64) {
        let mut latch = self.lock_latch();
        if latch.state.is_open() && latch.generation == generation {
            latch.state = DoorState::Closed;
        }
    }

    /// Keep `handle` unless a newer generation already stored its own.
    fn store_alarm(&self, generation: u64, handle: TimerHandle) {
        let mut alarm = self.lock_alarm();
        if generation >= alarm.generation {
            *alarm = Alarm { generation, handle: Some(handle) };
        }
    }

    fn lock_latch(&self) -> MutexGuard<'_, Latch> {
        self.latch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_alarm(&self) -> MutexGuard<'_, Alarm> {
        self.alarm.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Door for TimedDoor {
    fn open(&self) -> Result<(), DoorError> {
        let Some(generation) = self.transition(DoorState::Open)? else {
            return Ok(());
        };

        tracing::debug!(timeout = self.timeout, generation, "door opened");

        // State lock is released: a timer may notify synchronously.
        match self.timer.schedule(self.timeout, downgrade_client(&self.adapter)) {
            Ok(handle) => {
                self.store_alarm(generation, handle);
                Ok(())
            },
            Err(e) => {
                self.roll_back(generation);
                tracing::warn!(generation, "door timer registration failed: {}", e);
                Err(e)
            },
        }
    }

    fn close(&self) -> Result<(), DoorError> {
        if self.transition(DoorState::Closed)?.is_some() {
            tracing::debug!(timeout = self.timeout, "door closed");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.lock_latch().state.is_open()
    }
}

impl std::fmt::Debug for TimedDoor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedDoor")
            .field("state", &self.state())
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
