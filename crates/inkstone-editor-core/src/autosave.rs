//! Debounced auto-save signal.
//!
//! The shell re-arms the timer on every committed change and polls it from
//! the host's tick. Firing requires both that the debounce interval has
//! elapsed and that the content differs from the last observed value, so
//! an idle editor never signals. Deterministic by construction: the clock
//! is always passed in.

use smol_str::SmolStr;
use web_time::{Duration, Instant};

/// Debounce timer over Content Snapshots.
#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    deadline: Option<Instant>,
    last_observed: SmolStr,
    debounce: Duration,
}

impl AutosaveTimer {
    pub fn new(initial_value: &str, debounce_ms: u64) -> Self {
        Self {
            deadline: None,
            last_observed: SmolStr::new(initial_value),
            debounce: Duration::from_millis(debounce_ms),
        }
    }

    /// Start (or restart) the debounce window. Called on every content
    /// change; a change arriving before the previous window elapses pushes
    /// the deadline out.
    pub fn rearm(&mut self, now: Instant) {
        self.deadline = Some(now + self.debounce);
    }

    /// Disarm entirely (editor close).
    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check whether the auto-save signal fires at `now` for `current`.
    /// A firing consumes the deadline and records `current` as observed.
    pub fn poll(&mut self, now: Instant, current: &str) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if !current.is_empty() && current != self.last_observed {
                    self.last_observed = SmolStr::new(current);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}
