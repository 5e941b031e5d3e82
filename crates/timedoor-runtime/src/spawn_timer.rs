//! Asynchronous timer backed by tokio tasks.
//!
//! Every registration gets its own task: `schedule` validates, spawns and
//! returns immediately. The delay is measured from the `schedule` call: the
//! task sleeps through the `Environment` for whatever is left of it when it
//! first runs, then fires the registration. A callback fault stays inside its task and is
//! delivered to the registration's handle.

use std::sync::Weak;

use timedoor_core::{
    DoorError, Environment, Registration, Timer, TimerClient, TimerConfig, TimerHandle,
};
use tokio::runtime::Handle;

use crate::error::RuntimeError;

/// Fire-and-forget timer that spawns one task per registration.
#[derive(Debug, Clone)]
pub struct SpawnTimer<E: Environment> {
    env: E,
    config: TimerConfig,
    runtime: Handle,
}

impl<E: Environment> SpawnTimer<E> {
    /// Create a timer bound to the current tokio runtime.
    ///
    /// # Errors
    ///
    /// - `Runtime` if called outside a tokio runtime
    /// - `Config` if the tick is zero
    pub fn new(env: E, config: TimerConfig) -> Result<Self, RuntimeError> {
        let runtime = Handle::try_current().map_err(|e| RuntimeError::Runtime(e.to_string()))?;
        Self::with_handle(env, config, runtime)
    }

    /// Create a timer that spawns onto an explicit runtime.
    pub fn with_handle(env: E, config: TimerConfig, runtime: Handle) -> Result<Self, RuntimeError> {
        if config.tick.is_zero() {
            return Err(RuntimeError::Config("tick must be non-zero".to_string()));
        }
        Ok(Self { env, config, runtime })
    }

    /// Timing configuration.
    pub fn config(&self) -> TimerConfig {
        self.config
    }
}

impl<E: Environment> Timer for SpawnTimer<E> {
    fn schedule(
        &self,
        delay: i64,
        client: Weak<dyn TimerClient>,
    ) -> Result<TimerHandle, DoorError> {
        let (registration, handle) = Registration::new(delay, client)?;
        let wait = self.config.delay_for(registration.delay())?;
        let env = self.env.clone();
        let registered = env.now();

        tracing::debug!(delay, ?wait, "timer registered");

        self.runtime.spawn(async move {
            let remaining = wait.saturating_sub(env.elapsed_since(registered));
            env.sleep(remaining).await;
            // Outcome is logged and delivered to the handle by `fire`
            let _ = registration.fire();
        });

        Ok(handle)
    }
}
