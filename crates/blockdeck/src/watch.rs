//! Trailing-edge debounce for mutation bursts.

use std::time::{Duration, Instant};

/// Quiet period a mutation burst must hold before a rescan runs.
pub const RESCAN_DEBOUNCE: Duration = Duration::from_millis(300);

/// Single-shot timer with cancel-and-reschedule semantics: every `note`
/// pushes the deadline out, `poll` fires at most once per quiet period.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record one mutation at `now`, rearming the timer.
    pub fn note(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once after the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(RESCAN_DEBOUNCE)
    }
}
