//! Reset-on-change delay for filter edits
//!
//! Every `schedule` replaces the pending value and restarts the quiet
//! period, so a burst of keystrokes yields one filter run with the last
//! value. Callers pass the current instant in, which keeps the timing
//! testable.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the delay
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if due {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Drop the pending value
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
