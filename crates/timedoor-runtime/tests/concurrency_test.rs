//! Door transitions racing timer callbacks on a multi-threaded runtime.
//!
//! Callbacks run on worker threads while `open` and `close` are called from
//! others. The adapter must report exactly what the door state was when it
//! checked, and concurrent transitions must leave the door consistent.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use timedoor_core::{
    Door, DoorError, Registration, TimedDoor, Timer, TimerClient, TimerConfig, TimerHandle,
};
use timedoor_runtime::{SpawnTimer, SystemEnv};
use tokio::{runtime::Handle, sync::Semaphore};

/// Timer whose callbacks run on the runtime once the test opens the gate.
struct GatedTimer {
    runtime: Handle,
    gate: Arc<Semaphore>,
}

impl GatedTimer {
    fn new() -> Self {
        Self { runtime: Handle::current(), gate: Arc::new(Semaphore::new(0)) }
    }

    fn release(&self, callbacks: usize) {
        self.gate.add_permits(callbacks);
    }
}

impl Timer for GatedTimer {
    fn schedule(
        &self,
        delay: i64,
        client: Weak<dyn TimerClient>,
    ) -> Result<TimerHandle, DoorError> {
        let (registration, handle) = Registration::new(delay, client)?;
        let gate = self.gate.clone();

        self.runtime.spawn(async move {
            // One permit per callback, never returned
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
            let _ = registration.fire();
        });

        Ok(handle)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn close_on_another_thread_suppresses_in_flight_alarm() {
    let timer = Arc::new(GatedTimer::new());
    let door = TimedDoor::new(1, timer.clone()).unwrap();

    for _ in 0..200 {
        door.open().unwrap();
        let alarm = door.take_alarm().unwrap();

        let closer = door.clone();
        tokio::spawn(async move { closer.close() }).await.unwrap().unwrap();

        timer.release(1);
        assert_eq!(alarm.join().await, Ok(()));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn alarm_on_another_thread_sees_door_left_open() {
    let timer = Arc::new(GatedTimer::new());
    let door = TimedDoor::new(1, timer.clone()).unwrap();

    for _ in 0..200 {
        door.open().unwrap();
        let alarm = door.take_alarm().unwrap();

        timer.release(1);
        assert_eq!(alarm.join().await, Err(DoorError::LeftOpen));

        door.close().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_transitions_keep_door_consistent() {
    let timer = SpawnTimer::new(SystemEnv::new(), TimerConfig { tick: Duration::from_millis(1) })
        .unwrap();
    let door = TimedDoor::new(1, Arc::new(timer)).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let door = door.clone();
            tokio::spawn(async move {
                let mut alarms = Vec::new();
                for _ in 0..100 {
                    door.open().unwrap();
                    alarms.extend(door.take_alarm());
                    tokio::task::yield_now().await;
                    door.close().unwrap();
                }
                alarms
            })
        })
        .collect();

    let mut alarms = Vec::new();
    for worker in workers {
        alarms.extend(worker.await.unwrap());
    }

    for alarm in alarms {
        let outcome = alarm.join().await;
        assert!(
            matches!(outcome, Ok(()) | Err(DoorError::LeftOpen)),
            "unexpected alarm outcome: {outcome:?}"
        );
    }

    door.close().unwrap();
    assert!(!door.is_open());
    assert_eq!(door.adapter().notify(), Ok(()));
    assert_eq!(door.assert_not_expired(), Ok(()));
}
