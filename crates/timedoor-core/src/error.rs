//! Door and timer error types.

use thiserror::Error;

use crate::door::DoorState;

/// Errors from door and timer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DoorError {
    /// Door constructed with a non-positive timeout.
    #[error("invalid configuration: timeout must be positive, got {timeout}")]
    InvalidConfiguration {
        /// The rejected timeout.
        timeout: i64,
    },

    /// Repeat transition under the strict policy.
    #[error("invalid transition: door is already {state}")]
    InvalidTransition {
        /// State the door was already in.
        state: DoorState,
    },

    /// Timer registration rejected.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the rejected argument.
        reason: String,
    },

    /// Door observed open when its timeout was checked.
    #[error("door is still open")]
    LeftOpen,

    /// Timer was torn down before delivering the callback outcome.
    #[error("timer dropped before the callback fired")]
    TimerDropped,
}

impl DoorError {
    /// Returns true if this error is the left-open fault.
    ///
    /// Everything else is a usage or lifecycle error.
    pub fn is_fault(&self) -> bool {
        match self {
            Self::LeftOpen => true,

            Self::InvalidConfiguration { .. }
            | Self::InvalidTransition { .. }
            | Self::InvalidArgument { .. }
            | Self::TimerDropped => false,
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_open_is_fault() {
        assert!(DoorError::LeftOpen.is_fault());
    }

    #[test]
    fn usage_errors_are_not_faults() {
        assert!(!DoorError::InvalidConfiguration { timeout: 0 }.is_fault());
        assert!(!DoorError::InvalidTransition { state: DoorState::Open }.is_fault());
        assert!(!DoorError::invalid_argument("negative delay").is_fault());
        assert!(!DoorError::TimerDropped.is_fault());
    }

    #[test]
    fn error_display() {
        let err = DoorError::InvalidConfiguration { timeout: -3 };
        assert_eq!(err.to_string(), "invalid configuration: timeout must be positive, got -3");

        let err = DoorError::InvalidTransition { state: DoorState::Closed };
        assert_eq!(err.to_string(), "invalid transition: door is already closed");

        assert_eq!(DoorError::LeftOpen.to_string(), "door is still open");
    }
}
