//! End-to-end door scenarios on the deterministic timer.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use timedoor_core::{
    Door, DoorError, DoorTimerAdapter, TimedDoor, Timer, TimerClient, downgrade_client,
};
use timedoor_harness::ManualTimer;

/// Adapter wrapper that counts notifications.
struct CountingBridge {
    inner: DoorTimerAdapter<TimedDoor>,
    calls: AtomicUsize,
}

impl TimerClient for CountingBridge {
    fn notify(&self) -> Result<(), DoorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.notify()
    }
}

fn door(timeout: i64) -> (Arc<TimedDoor>, Arc<ManualTimer>) {
    let timer = Arc::new(ManualTimer::new());
    let door = TimedDoor::new(timeout, timer.clone()).unwrap();
    (door, timer)
}

#[test]
fn left_open_door_faults_once_after_timeout() {
    let (door, timer) = door(1);
    let bridge = Arc::new(CountingBridge {
        inner: DoorTimerAdapter::new(&door),
        calls: AtomicUsize::new(0),
    });

    door.open().unwrap();
    let mut handle = timer.schedule(door.timeout(), downgrade_client(&bridge)).unwrap();

    assert_eq!(handle.try_join(), None);
    timer.advance(1);
    timer.advance(1);

    assert_eq!(bridge.calls.load(Ordering::SeqCst), 1);
    assert_eq!(handle.try_join(), Some(Err(DoorError::LeftOpen)));
}

#[test]
fn door_alarm_faults_when_left_open() {
    let (door, timer) = door(1);

    door.open().unwrap();
    let mut alarm = door.take_alarm().unwrap();

    assert_eq!(timer.advance(1), vec![Err(DoorError::LeftOpen)]);
    assert_eq!(alarm.try_join(), Some(Err(DoorError::LeftOpen)));
    assert_eq!(door.assert_not_expired(), Err(DoorError::LeftOpen));
}

#[test]
fn close_before_timeout_suppresses_fault() {
    let (door, timer) = door(1);

    door.open().unwrap();
    let mut alarm = door.take_alarm().unwrap();
    door.close().unwrap();

    timer.advance(1);

    assert_eq!(alarm.try_join(), Some(Ok(())));
    assert_eq!(door.adapter().notify(), Ok(()));
    assert_eq!(door.assert_not_expired(), Ok(()));
}

#[test]
fn timeout_unchanged_across_cycles() {
    let (door, timer) = door(42);

    for _ in 0..100 {
        door.open().unwrap();
        timer.advance(50);
        door.close().unwrap();
    }

    assert_eq!(door.timeout(), 42);
    assert!(!door.is_open());
}

#[test]
fn reopen_before_first_alarm_keeps_both_alarms() {
    let (door, timer) = door(3);

    door.open().unwrap();
    timer.advance(1);
    door.close().unwrap();
    door.open().unwrap();

    // First alarm at tick 3, second at tick 4, door open for both
    assert_eq!(timer.advance(2), vec![Err(DoorError::LeftOpen)]);
    door.close().unwrap();
    assert_eq!(timer.advance(1), vec![Ok(())]);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn doors_sharing_a_timer_are_independent() {
    let timer = Arc::new(ManualTimer::new());
    let front = TimedDoor::new(2, timer.clone()).unwrap();
    let back = TimedDoor::new(2, timer.clone()).unwrap();

    front.open().unwrap();
    back.open().unwrap();
    back.close().unwrap();

    let outcomes = timer.advance(2);
    assert_eq!(outcomes, vec![Err(DoorError::LeftOpen), Ok(())]);
}

#[test]
fn negative_delay_never_notifies() {
    let (door, timer) = door(1);
    let bridge = Arc::new(CountingBridge {
        inner: DoorTimerAdapter::new(&door),
        calls: AtomicUsize::new(0),
    });

    let result = timer.schedule(-1, downgrade_client(&bridge));
    assert!(matches!(result, Err(DoorError::InvalidArgument { .. })));

    timer.advance(100);
    assert_eq!(bridge.calls.load(Ordering::SeqCst), 0);
}
