//! Session driver.
//!
//! Runs one open/hold/close cycle of a [`TimedDoor`] on a [`SpawnTimer`] and
//! waits for the door's alarm, surfacing the background outcome to the
//! caller.

use std::{sync::Arc, time::Duration};

use timedoor_core::{Door, Environment, TimedDoor};

use crate::{RuntimeConfig, error::RuntimeError, spawn_timer::SpawnTimer};

/// Summary of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// How long the door was held open before closing, if it was closed.
    pub held: Option<Duration>,
    /// Time from opening until the alarm resolved.
    pub elapsed: Duration,
}

/// One timed door driven by a tokio timer.
pub struct Session<E: Environment> {
    env: E,
    door: Arc<TimedDoor>,
    hold: Option<Duration>,
}

impl<E: Environment> Session<E> {
    /// Build the timer and door described by `config`.
    ///
    /// # Errors
    ///
    /// - `Runtime` if called outside a tokio runtime
    /// - `Config` for a zero tick
    /// - `Door` for a non-positive timeout
    pub fn new(env: E, config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        let timer = SpawnTimer::new(env.clone(), config.timer)?;
        let door = TimedDoor::with_config(config.door, Arc::new(timer))?;

        Ok(Self { env, door, hold: config.hold })
    }

    /// The driven door.
    pub fn door(&self) -> &Arc<TimedDoor> {
        &self.door
    }

    /// Open the door, close it after the hold (if any) and wait for the alarm.
    ///
    /// # Errors
    ///
    /// - `Door(LeftOpen)` if the door was still open when the alarm fired
    /// - `Door(..)` for any other door or timer failure
    /// - `Internal` if the door was already open and no alarm was armed
    pub async fn run(&self) -> Result<SessionReport, RuntimeError> {
        let started = self.env.now();

        self.door.open()?;
        let alarm = self
            .door
            .take_alarm()
            .ok_or_else(|| RuntimeError::Internal("door opened without arming".to_string()))?;

        tracing::info!(timeout = self.door.timeout(), "door opened");

        if let Some(hold) = self.hold {
            self.env.sleep(hold).await;
            self.door.close()?;
            tracing::info!("door closed after {:?}", hold);
        }

        let outcome = alarm.join().await;
        let elapsed = self.env.elapsed_since(started);

        match outcome {
            Ok(()) => {
                tracing::info!("timeout passed with door closed");
                Ok(SessionReport { held: self.hold, elapsed })
            },
            Err(e) => {
                tracing::error!("timeout check failed: {}", e);
                Err(e.into())
            },
        }
    }
}
