//! Fuzz target for the [`TimedDoor`] state machine
//!
//! Prevent missed or spurious left-open faults under arbitrary interleavings
//! of transitions, checks and timer ticks.
//!
//! # Strategy
//!
//! - Operation sequences: Arbitrary opens, closes, assertions, direct
//!   notifications and timer advances
//! - Policies: Both idempotent and strict repeat handling
//! - Timeouts: Arbitrary positive timeouts, including ones that never come
//!   due within the run
//!
//! # Invariants
//!
//! - Real door and reference model agree on every result
//! - Fault reported iff the door is open at check time
//! - Every alarm fires at most once
//! - Timeout never changes
//! - NEVER panic

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use timedoor_core::{Door, DoorConfig, DoorError, TimedDoor, TimerClient, TransitionPolicy};
use timedoor_harness::{ManualTimer, ModelDoor, Operation, OperationResult};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    timeout: u16,
    strict: bool,
    ops: Vec<Operation>,
}

fuzz_target!(|input: FuzzInput| {
    let timeout = i64::from(input.timeout).max(1);
    let policy = if input.strict { TransitionPolicy::Strict } else { TransitionPolicy::Idempotent };

    let timer = Arc::new(ManualTimer::new());
    let Ok(door) = TimedDoor::with_config(DoorConfig { timeout, policy }, timer.clone()) else {
        panic!("positive timeout rejected: {timeout}");
    };
    let mut model = ModelDoor::new(timeout, input.strict);
    let mut faults = 0usize;
    let mut opened = 0usize;
    let mut fired = 0usize;

    for op in input.ops {
        let was_open = door.is_open();

        let real: OperationResult = match op {
            Operation::Open => door.open().into(),
            Operation::Close => door.close().into(),
            Operation::AssertNotExpired => door.assert_not_expired().into(),
            Operation::Notify => door.adapter().notify().into(),
            Operation::Advance { ticks } => {
                let outcomes = timer.advance(u64::from(ticks));
                fired += outcomes.len();
                for outcome in outcomes {
                    match outcome {
                        Ok(()) => assert!(!was_open, "alarm passed while door open"),
                        Err(DoorError::LeftOpen) => {
                            assert!(was_open, "alarm faulted while door closed");
                            faults += 1;
                        },
                        Err(e) => panic!("unexpected alarm outcome: {e}"),
                    }
                }
                OperationResult::Ok
            },
        };

        if matches!(op, Operation::Open) && !was_open {
            opened += 1;
        }

        let expected = model.apply(op);
        assert_eq!(real, expected, "divergence on {op:?}");
        assert_eq!(door.is_open(), model.observable_state().open);
        assert_eq!(door.timeout(), timeout);
    }

    let state = model.observable_state();
    assert_eq!(faults, state.faults);
    assert_eq!(fired + timer.pending(), opened, "alarm fired more than once or lost");
});
