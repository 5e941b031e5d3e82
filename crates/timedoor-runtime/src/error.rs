//! Runtime error types.

use thiserror::Error;
use timedoor_core::DoorError;

/// Errors that can occur while driving a door at runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Async runtime unavailable or misused
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Door or timer error
    #[error("door error: {0}")]
    Door(#[from] DoorError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl RuntimeError {
    /// Returns true if the door was left open past its timeout.
    pub fn is_left_open(&self) -> bool {
        matches!(self, Self::Door(e) if e.is_fault())
    }
}
