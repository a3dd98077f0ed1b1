//! Keystroke coalescing
//!
//! Every qualifying keystroke records the current input value and restarts
//! the debounce timer, so a burst of typing produces a single drain once the
//! user pauses for the full delay.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::timer::{TimerSlot, TimerToken};

use super::events::{Key, Wakeup};
use super::scheduler::RequestScheduler;

#[derive(Debug)]
pub struct QueryCoalescer {
    delay: Duration,
    debounce: TimerSlot,
}

impl QueryCoalescer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            debounce: TimerSlot::new(),
        }
    }

    /// Record a keystroke
    ///
    /// Returns false for navigation keys, which are left to the keyboard
    /// navigation path.
    pub fn on_keystroke(
        &mut self,
        key: Key,
        value: &str,
        scheduler: &mut RequestScheduler,
        wakeups: &UnboundedSender<Wakeup>,
    ) -> bool {
        if key.is_navigation() {
            return false;
        }

        scheduler.enqueue(value);
        self.debounce.schedule(self.delay, wakeups, Wakeup::Debounce);
        true
    }

    /// Accept a debounce wakeup; false if it was superseded or cancelled
    pub fn fire(&mut self, token: TimerToken) -> bool {
        self.debounce.fire(token)
    }

    pub fn cancel(&mut self) -> bool {
        self.debounce.cancel()
    }

    pub fn is_armed(&self) -> bool {
        self.debounce.is_armed()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
#[path = "coalescer_tests.rs"]
mod coalescer_tests;
