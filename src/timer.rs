//! Cancellable one-shot timers
//!
//! A [`TimerSlot`] owns at most one live timer. Scheduling replaces any
//! armed timer, and every schedule or cancel moves the slot to a new
//! generation, so a wakeup that was already queued before the cancel is
//! recognised as stale when it is finally delivered.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Identifies one particular scheduling of a [`TimerSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: u64,
    armed: Option<CancellationToken>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot, replacing any pending timer
    ///
    /// When `delay` elapses the value built by `wakeup` is sent on `tx`.
    /// Must be called from within a tokio runtime.
    pub fn schedule<T, F>(&mut self, delay: Duration, tx: &UnboundedSender<T>, wakeup: F) -> TimerToken
    where
        T: Send + 'static,
        F: FnOnce(TimerToken) -> T + Send + 'static,
    {
        self.cancel();

        let token = TimerToken(self.generation);
        let cancel = CancellationToken::new();
        let cancelled = cancel.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone means the controller was dropped
                    let _ = tx.send(wakeup(token));
                }
            }
        });

        self.armed = Some(cancel);
        token
    }

    /// Disarm the slot. Returns true if a timer was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        match self.armed.take() {
            Some(cancel) => {
                cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Accept a delivered wakeup
    ///
    /// Returns true only for the token of the currently armed timer; the slot
    /// is disarmed afterwards.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed.is_none() || token.0 != self.generation {
            return false;
        }
        self.armed = None;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Some(cancel) = self.armed.take() {
            cancel.cancel();
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod timer_tests;
