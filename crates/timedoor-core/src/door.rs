//! Door capability and state.

use std::fmt;

use crate::error::DoorError;

/// Open/closed state of a door.
///
/// There are no transient states: a door is observed either open or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DoorState {
    /// Door is closed. Initial state.
    #[default]
    Closed,
    /// Door is open and its timeout is running.
    Open,
}

impl DoorState {
    /// Returns true for [`DoorState::Open`].
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("closed"),
            Self::Open => f.write_str("open"),
        }
    }
}

/// A door that can be opened, closed and queried.
///
/// Implemented by [`TimedDoor`](crate::TimedDoor) and by test doubles. The
/// adapter only depends on this trait, so any implementation can sit behind
/// it.
///
/// Methods take `&self`: doors are shared with background timer tasks and
/// must synchronize internally.
pub trait Door: Send + Sync {
    /// Open the door.
    fn open(&self) -> Result<(), DoorError>;

    /// Close the door.
    fn close(&self) -> Result<(), DoorError>;

    /// Whether the door is currently open. Never fails.
    fn is_open(&self) -> bool;

    /// Fail with [`DoorError::LeftOpen`] if the door is currently open.
    ///
    /// The check reads the state once, at the moment of the call. A door
    /// closed before the check never faults.
    fn assert_not_expired(&self) -> Result<(), DoorError> {
        if self.is_open() { Err(DoorError::LeftOpen) } else { Ok(()) }
    }
}
