//! Deterministic test harness for timed doors.
//!
//! A tick-driven [`ManualTimer`], a virtual-clock [`SimEnv`], and a reference
//! model for model-based testing.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation. Operations are
//! applied to both the model and a real `TimedDoor` on a `ManualTimer`, and
//! their observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod manual_timer;
pub mod model;
mod sim_env;

pub use manual_timer::ManualTimer;
pub use model::{ModelDoor, ObservableState, Operation, OperationError, OperationResult};
pub use sim_env::SimEnv;
