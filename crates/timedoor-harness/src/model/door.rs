//! Reference door model.

use super::operation::{Operation, OperationError, OperationResult};

/// Observable state compared between model and real system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Whether the door is open.
    pub open: bool,
    /// Configured timeout.
    pub timeout: i64,
    /// Current tick.
    pub now: u64,
    /// Alarms registered but not yet fired.
    pub pending_alarms: usize,
    /// Alarms that fired while the door was open.
    pub faults: usize,
}

/// Reference implementation of a timed door plus its timer.
///
/// Plain fields, no locks or handles: alarms are just the ticks they are due
/// at.
#[derive(Debug, Clone)]
pub struct ModelDoor {
    open: bool,
    timeout: i64,
    strict: bool,
    now: u64,
    alarms: Vec<u64>,
    faults: usize,
}

impl ModelDoor {
    /// Create a closed model door. `timeout` must be positive.
    pub fn new(timeout: i64, strict: bool) -> Self {
        Self { open: false, timeout, strict, now: 0, alarms: Vec::new(), faults: 0 }
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: Operation) -> OperationResult {
        match op {
            Operation::Open => self.transition(true),
            Operation::Close => self.transition(false),
            Operation::AssertNotExpired | Operation::Notify => self.check(),
            Operation::Advance { ticks } => {
                self.advance(u64::from(ticks));
                OperationResult::Ok
            },
        }
    }

    /// Current observable state.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            open: self.open,
            timeout: self.timeout,
            now: self.now,
            pending_alarms: self.alarms.len(),
            faults: self.faults,
        }
    }

    fn transition(&mut self, open: bool) -> OperationResult {
        if self.open == open {
            return if self.strict {
                OperationResult::Error(OperationError::InvalidTransition)
            } else {
                OperationResult::Ok
            };
        }

        self.open = open;
        if open {
            let delay = u64::try_from(self.timeout).unwrap_or(u64::MAX);
            self.alarms.push(self.now.saturating_add(delay));
        }
        OperationResult::Ok
    }

    fn check(&self) -> OperationResult {
        if self.open { OperationResult::Error(OperationError::LeftOpen) } else { OperationResult::Ok }
    }

    fn advance(&mut self, ticks: u64) {
        self.now = self.now.saturating_add(ticks);
        let now = self.now;

        let before = self.alarms.len();
        self.alarms.retain(|&due| due > now);
        let fired = before - self.alarms.len();

        if self.open {
            self.faults += fired;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm_faults_only_while_open() {
        let mut model = ModelDoor::new(2, false);

        model.apply(Operation::Open);
        model.apply(Operation::Advance { ticks: 2 });
        assert_eq!(model.observable_state().faults, 1);

        model.apply(Operation::Close);
        model.apply(Operation::Open);
        model.apply(Operation::Close);
        model.apply(Operation::Advance { ticks: 5 });

        let state = model.observable_state();
        assert_eq!(state.faults, 1);
        assert_eq!(state.pending_alarms, 0);
    }

    #[test]
    fn strict_model_rejects_repeats() {
        let mut model = ModelDoor::new(1, true);
        assert_eq!(
            model.apply(Operation::Close),
            OperationResult::Error(OperationError::InvalidTransition)
        );
        assert!(model.apply(Operation::Open).is_ok());
        assert!(model.apply(Operation::Open).is_err());
    }
}
