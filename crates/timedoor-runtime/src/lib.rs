//! Timed door runtime.
//!
//! This crate provides the production drivers for `timedoor-core`:
//! - Tokio for async timers
//! - System time
//!
//! ## Architecture
//!
//! ```text
//! timedoor-runtime
//!   ├─ SystemEnv     (production Environment impl)
//!   ├─ SpawnTimer    (one tokio task per registration)
//!   └─ Session       (open / hold / close / await alarm)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod session;
mod spawn_timer;
mod system_env;

use std::time::Duration;

pub use error::RuntimeError;
pub use session::{Session, SessionReport};
pub use spawn_timer::SpawnTimer;
pub use system_env::SystemEnv;
use timedoor_core::{DoorConfig, TimerConfig};

/// Configuration for a runtime session.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Door timeout and transition policy
    pub door: DoorConfig,
    /// Timer tick length
    pub timer: TimerConfig,
    /// How long to keep the door open before closing it. `None` leaves it
    /// open.
    pub hold: Option<Duration>,
}
