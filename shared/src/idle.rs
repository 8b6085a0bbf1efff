//! Inactivity countdown that brings up the screensaver.
//!
//! At most one countdown is armed at a time. Arming again supersedes the
//! previous countdown, whose id is handed back so the caller can cancel it
//! with the shell. A fire is accepted only for the armed id, and only once.

use crate::capabilities::TimerId;
use crate::config::DEFAULT_IDLE_TIMEOUT_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InactivityTimer {
    timeout_ms: u64,
    armed: Option<TimerId>,
}

impl Default for InactivityTimer {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT_MS)
    }
}

impl InactivityTimer {
    #[must_use]
    pub const fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms, armed: None }
    }

    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.armed.is_some()
    }

    #[must_use]
    pub const fn armed(&self) -> Option<TimerId> {
        self.armed
    }

    /// Restarts the countdown from zero with the current timeout.
    pub fn reset(&mut self, id: TimerId) -> Option<TimerId> {
        self.armed.replace(id)
    }

    /// Stops the countdown. Returns the id the shell should cancel, if any.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.armed.take()
    }

    /// Returns `true` when `id` is the armed countdown; the timer is then spent
    /// and stays stopped until started again.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.armed == Some(id) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
