//! Operations for model-based testing.
//!
//! Operations represent every action a client or the clock can take on a
//! timed door. They are generated randomly by proptest and applied to both the
//! model and the real implementation.

use arbitrary::Arbitrary;
use timedoor_core::DoorError;

/// Operations that can be applied to a timed door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Open the door.
    Open,

    /// Close the door.
    Close,

    /// Assert the door has not been left open.
    AssertNotExpired,

    /// Deliver a notification to the door's adapter directly, outside the
    /// timer.
    Notify,

    /// Advance the timer.
    ///
    /// Fires every alarm that comes due.
    Advance {
        /// Ticks to advance (kept small so alarms interleave with
        /// transitions).
        ticks: u8,
    },
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation failed with expected error.
    Error(OperationError),
}

/// Expected errors that can occur during operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Door observed open at a timeout check.
    LeftOpen,

    /// Repeat transition under the strict policy.
    InvalidTransition,

    /// Anything the model never produces.
    Unexpected(String),
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, OperationResult::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl From<Result<(), DoorError>> for OperationResult {
    fn from(result: Result<(), DoorError>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(DoorError::LeftOpen) => Self::Error(OperationError::LeftOpen),
            Err(DoorError::InvalidTransition { .. }) => {
                Self::Error(OperationError::InvalidTransition)
            },
            Err(e) => Self::Error(OperationError::Unexpected(e.to_string())),
        }
    }
}
