use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Debounce window for coalescing rapid marker moves (milliseconds)
pub const DEBOUNCE_MS: u64 = 300;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Trailing-edge debouncer: each `schedule` cancels the pending fire and
/// re-arms the window, so a burst of calls fires exactly once, after the
/// burst goes quiet.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the window. A pending fire is superseded, not run.
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Drop any pending fire.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True while a fire is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check the window against `now`; returns true exactly once per burst.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}
