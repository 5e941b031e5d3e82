//! Reference model for model-based testing.
//!
//! The model is a simplified implementation that captures the expected
//! behavior of a timed door and its timer without locks, weak references or
//! handles. It serves as the oracle against which `TimedDoor` driven by a
//! `ManualTimer` is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Behavior not implementation: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

mod door;
pub mod operation;

pub use door::{ModelDoor, ObservableState};
pub use operation::{Operation, OperationError, OperationResult};
