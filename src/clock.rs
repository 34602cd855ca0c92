use crate::domain::TimelineConfig;
use chrono::Local;
use std::time::{Duration, Instant};

/// Refresh cadence for the "now" pointer, in real seconds
pub const CLOCK_REFRESH_SECS: u64 = 60;

/// The live "now" indicator on the bar.
///
/// Read-only: it shares the bar's coordinate system but never touches the
/// markers. Each refresh recomputes the position from absolute wall-clock
/// time, so a host that sleeps and resumes just snaps to the right place on
/// the next tick instead of accumulating drift.
#[derive(Debug)]
pub struct ClockPointer {
    position: f64,
    last_refresh: Option<Instant>,
}

impl ClockPointer {
    pub fn new(config: &TimelineConfig) -> Self {
        let mut pointer = Self {
            position: 0.0,
            last_refresh: None,
        };
        pointer.refresh(config);
        pointer
    }

    /// Current bar position of "now", as of the last refresh.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Refresh if the cadence is due; called from the UI tick.
    pub fn tick(&mut self, config: &TimelineConfig) {
        let due = match self.last_refresh {
            None => true,
            Some(at) => at.elapsed() >= Duration::from_secs(CLOCK_REFRESH_SECS),
        };
        if due {
            self.refresh(config);
        }
    }

    /// Unconditional recompute from the wall clock.
    pub fn refresh(&mut self, config: &TimelineConfig) {
        self.position = config.position_of_time(Local::now().time());
        self.last_refresh = Some(Instant::now());
    }
}
