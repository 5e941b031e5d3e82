//! Timed door CLI.
//!
//! # Usage
//!
//! ```bash
//! # Open for 3 seconds with a 5 second timeout (no fault)
//! timedoor --timeout 5 --hold-ms 3000
//!
//! # Leave the door open (faults after the timeout)
//! timedoor --timeout 2 --tick-ms 500
//! ```

use std::time::Duration;

use clap::Parser;
use timedoor_core::{DoorConfig, TimerConfig, TransitionPolicy};
use timedoor_runtime::{RuntimeConfig, Session, SystemEnv};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Timed door monitor
#[derive(Parser, Debug)]
#[command(name = "timedoor")]
#[command(about = "Open a door and fault if it stays open past its timeout")]
#[command(version)]
struct Args {
    /// Timeout in ticks
    #[arg(short, long, default_value = "5", allow_negative_numbers = true)]
    timeout: i64,

    /// Length of one tick in milliseconds
    #[arg(long, default_value = "1000")]
    tick_ms: u64,

    /// Close the door after this many milliseconds (default: never)
    #[arg(long)]
    hold_ms: Option<u64>,

    /// Reject repeated open/close instead of ignoring them
    #[arg(long)]
    strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        let policy =
            if self.strict { TransitionPolicy::Strict } else { TransitionPolicy::Idempotent };

        RuntimeConfig {
            door: DoorConfig { timeout: self.timeout, policy },
            timer: TimerConfig { tick: Duration::from_millis(self.tick_ms) },
            hold: self.hold_ms.map(Duration::from_millis),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = args.runtime_config();
    tracing::info!(
        timeout = config.door.timeout,
        tick = ?config.timer.tick,
        hold = ?config.hold,
        "timedoor starting"
    );

    let session = Session::new(SystemEnv::new(), &config)?;
    let report = session.run().await?;

    tracing::info!("session finished in {:?}", report.elapsed);

    Ok(())
}
