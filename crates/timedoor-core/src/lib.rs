//! Timed door core.
//!
//! A door that must not stay open past its timeout, a timer that notifies a
//! client once after a delay, and the adapter between the two.
//!
//! ## Architecture
//!
//! ```text
//!   client ──open()──▶ TimedDoor ──schedule(timeout, adapter)──▶ Timer
//!                        ▲    │ owns                              │
//!                        │    ▼                                   │ after delay
//!          is_open() ────┴─ DoorTimerAdapter ◀────notify()────────┘
//! ```
//!
//! The core has no runtime. Timer drivers live elsewhere and are injected:
//! the tokio-backed timer in `timedoor-runtime`, the deterministic one in
//! `timedoor-harness`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod door;
pub mod env;
pub mod error;
pub mod timed_door;
pub mod timer;

pub use adapter::DoorTimerAdapter;
pub use door::{Door, DoorState};
pub use env::Environment;
pub use error::DoorError;
pub use timed_door::{DoorConfig, TimedDoor, TransitionPolicy};
pub use timer::{Registration, Timer, TimerClient, TimerConfig, TimerHandle, downgrade_client};
