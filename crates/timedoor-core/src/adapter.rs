//! Bridge from timer notifications to door checks.

use std::sync::{Arc, Weak};

use crate::{door::Door, error::DoorError, timer::TimerClient};

/// Adapts a [`Door`] to the [`TimerClient`] contract.
///
/// Holds a non-owning back-reference: the adapter never keeps its door alive,
/// and a notification arriving after the door is gone is a no-op.
///
/// The adapter only observes. It never opens or closes the door, so a later
/// `assert_not_expired` on a door still left open keeps failing.
pub struct DoorTimerAdapter<D: ?Sized> {
    door: Weak<D>,
}

impl<D: Door + ?Sized> DoorTimerAdapter<D> {
    /// Bind an adapter to `door` for the adapter's whole lifetime.
    pub fn new(door: &Arc<D>) -> Self {
        Self { door: Arc::downgrade(door) }
    }

    /// Bind from an existing weak reference (used while the door is being
    /// constructed).
    pub fn from_weak(door: Weak<D>) -> Self {
        Self { door }
    }

    /// Whether the bound door is still alive.
    pub fn is_bound(&self) -> bool {
        self.door.strong_count() > 0
    }
}

impl<D: Door + ?Sized> TimerClient for DoorTimerAdapter<D> {
    fn notify(&self) -> Result<(), DoorError> {
        match self.door.upgrade() {
            Some(door) => door.assert_not_expired(),
            None => {
                tracing::debug!("door dropped before timeout check");
                Ok(())
            },
        }
    }
}

impl<D: ?Sized> std::fmt::Debug for DoorTimerAdapter<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoorTimerAdapter").field("bound", &(self.door.strong_count() > 0)).finish()
    }
}
