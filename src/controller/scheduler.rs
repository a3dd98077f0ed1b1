//! Single-flight request scheduling
//!
//! Queries typed while a request is outstanding pile up in the pending
//! queue. When the scheduler drains, only the newest query is dispatched and
//! everything older is dropped: the user's latest intent is all that
//! matters.

/// Dismissal generation captured when a request is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleToken(u64);

/// A request the controller should start now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub query: String,
    pub cycle: CycleToken,
}

/// Whether a finished request still belongs to the current cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Fresh,
    /// The dropdown was dismissed while the request was in flight
    Stale,
}

#[derive(Debug, Default)]
pub struct RequestScheduler {
    pending: Vec<String>,
    busy: bool,
    cycle: u64,
}

impl RequestScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, query: impl Into<String>) {
        self.pending.push(query.into());
    }

    /// Take the newest pending query if nothing is in flight
    ///
    /// Safe to call at any time; returns None while busy or when the queue is
    /// empty.
    pub fn drain(&mut self) -> Option<Dispatch> {
        if self.busy {
            return None;
        }
        let query = self.pending.pop()?;
        if !self.pending.is_empty() {
            log::debug!("Superseded {} older queries", self.pending.len());
            self.pending.clear();
        }

        self.busy = true;
        Some(Dispatch {
            query,
            cycle: CycleToken(self.cycle),
        })
    }

    /// Record the end of the in-flight request
    pub fn complete(&mut self, cycle: CycleToken) -> Completion {
        if !self.busy {
            log::warn!("Completion received with no request in flight");
        }
        self.busy = false;

        if cycle.0 == self.cycle {
            Completion::Fresh
        } else {
            Completion::Stale
        }
    }

    /// Start a new cycle: outstanding results become stale and queued queries are dropped
    ///
    /// The in-flight request, if any, keeps running and still clears the busy
    /// flag when it completes.
    pub fn invalidate(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
        self.pending.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
