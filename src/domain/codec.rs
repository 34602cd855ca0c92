use chrono::Timelike;

/// Lowest valid marker position (left edge of the bar).
pub const MIN_POSITION: f64 = 0.0;
/// Highest valid marker position (right edge of the bar).
pub const MAX_POSITION: f64 = 100.0;

/// Timeline geometry: where the day starts and how many hours the bar spans.
///
/// Positions are percentages along the bar; all time math goes through this
/// config so a 26-hour bar starting at 02:00 is just different numbers here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineConfig {
    /// Wall-clock hour at position 0 (fractional hours allowed).
    pub day_start_hour: f64,
    /// Total hours spanned by positions 0..=100.
    pub day_length_hours: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 2.0,
            day_length_hours: 24.0,
        }
    }
}

impl TimelineConfig {
    pub fn new(day_start_hour: f64, day_length_hours: f64) -> Self {
        Self {
            day_start_hour,
            day_length_hours,
        }
    }

    /// Convert a bar position to a wall-clock "HH:MM" label.
    ///
    /// Hours wrap modulo 24; a position past the midnight wrap gets a "+"
    /// prefix ("+01:30" = 01:30 the next day). Minutes are floored, not
    /// rounded, so adjacent labels never disagree with duration math.
    pub fn position_to_time(&self, position: f64) -> String {
        let total_hours = (position / 100.0) * self.day_length_hours + self.day_start_hour;
        let hour = total_hours.floor() as i64;
        let minute = ((total_hours - hour as f64) * 60.0).floor() as i64;
        let display_hour = hour.rem_euclid(24);

        if hour >= 24 {
            format!("+{:02}:{:02}", display_hour, minute)
        } else {
            format!("{:02}:{:02}", display_hour, minute)
        }
    }

    /// Inverse of [`position_to_time`](Self::position_to_time): parse an
    /// "HH:MM" or "+HH:MM" label back into a bar position.
    ///
    /// Returns `None` for anything that is not a valid label. Times earlier
    /// than the day start are taken to mean the tail of the timeline (past
    /// midnight), matching how the label was produced.
    pub fn time_to_position(&self, label: &str) -> Option<f64> {
        let (next_day, rest) = match label.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, label),
        };

        let (hour_str, minute_str) = rest.split_once(':')?;
        let hour: u32 = hour_str.parse().ok()?;
        let minute: u32 = minute_str.parse().ok()?;
        if hour >= 24 || minute >= 60 {
            return None;
        }

        let mut hours = hour as f64 + minute as f64 / 60.0;
        if next_day {
            hours += 24.0;
        } else if hours < self.day_start_hour {
            hours += 24.0;
        }

        Some((hours - self.day_start_hour) / self.day_length_hours * 100.0)
    }

    /// Minutes covered by the span between two positions.
    pub fn span_minutes(&self, start: f64, end: f64) -> f64 {
        (end - start) / 100.0 * self.day_length_hours * 60.0
    }

    /// Bar position of a wall-clock time, for the live "now" pointer.
    ///
    /// Times before the day start belong to the tail of the previous
    /// timeline day (03:00 sits near the start of a 02:00 bar, 01:00 near
    /// the end). Clamped so a short bar never sends the pointer off-screen.
    pub fn position_of_time(&self, time: chrono::NaiveTime) -> f64 {
        let hours =
            time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0;
        let mut relative = hours - self.day_start_hour;
        if relative < 0.0 {
            relative += 24.0;
        }
        (relative / self.day_length_hours * 100.0).clamp(MIN_POSITION, MAX_POSITION)
    }
}

/// Clamp a position onto the bar.
pub fn clamp_position(position: f64) -> f64 {
    position.clamp(MIN_POSITION, MAX_POSITION)
}

/// Format a minute total for display as "Xh Ym" (omits 0 components).
///
/// Display is the one place durations are rounded; everything upstream keeps
/// fractional minutes.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.round() as i64;
    let hours = total / 60;
    let mins = total % 60;

    if hours > 0 && mins > 0 {
        format!("{}h {}m", hours, mins)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_position_to_time_scenario() {
        // Day of 24h starting at 02:00.
        let config = TimelineConfig::default();
        assert_eq!(config.position_to_time(0.0), "02:00");
        assert_eq!(config.position_to_time(25.0), "08:00");
        assert_eq!(config.position_to_time(50.0), "14:00");
        assert_eq!(config.position_to_time(100.0), "+02:00");
    }

    #[test]
    fn test_position_to_time_wraps_past_midnight() {
        let config = TimelineConfig::default();
        // 02:00 + 0.95 * 24h = 00:48 the next day.
        assert_eq!(config.position_to_time(95.0), "+00:48");
    }

    #[test]
    fn test_position_to_time_26_hour_bar() {
        let config = TimelineConfig::new(2.0, 26.0);
        assert_eq!(config.position_to_time(0.0), "02:00");
        assert_eq!(config.position_to_time(100.0), "+04:00");
        // (50/100) * 26 + 2 = 15:00
        assert_eq!(config.position_to_time(50.0), "15:00");
    }

    #[test]
    fn test_minutes_are_floored_not_rounded() {
        let config = TimelineConfig::default();
        // 3.99% of 24h = 57.456 min past 02:00 -> 02:57, never 02:58.
        assert_eq!(config.position_to_time(3.99), "02:57");
    }

    #[test]
    fn test_time_to_position_round_trip() {
        let config = TimelineConfig::default();
        // One display minute of tolerance: labels floor to the minute.
        let tolerance = 100.0 / (24.0 * 60.0);
        for pos in [0.0, 3.7, 25.0, 49.99, 66.6, 91.3, 100.0] {
            let label = config.position_to_time(pos);
            let back = config.time_to_position(&label).unwrap();
            assert!(
                (back - pos).abs() <= tolerance,
                "{} -> {} -> {}",
                pos,
                label,
                back
            );
        }
    }

    #[test]
    fn test_time_to_position_rejects_garbage() {
        let config = TimelineConfig::default();
        assert_eq!(config.time_to_position(""), None);
        assert_eq!(config.time_to_position("0800"), None);
        assert_eq!(config.time_to_position("25:00"), None);
        assert_eq!(config.time_to_position("08:61"), None);
        assert_eq!(config.time_to_position("ab:cd"), None);
    }

    #[test]
    fn test_span_minutes() {
        let config = TimelineConfig::default();
        assert_eq!(config.span_minutes(25.0, 50.0), 360.0);
        assert_eq!(config.span_minutes(0.0, 100.0), 24.0 * 60.0);

        let long = TimelineConfig::new(2.0, 26.0);
        assert_eq!(long.span_minutes(0.0, 50.0), 13.0 * 60.0);
    }

    #[test]
    fn test_position_of_time() {
        let config = TimelineConfig::default();
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        assert_eq!(config.position_of_time(at(2, 0)), 0.0);
        assert_eq!(config.position_of_time(at(8, 0)), 25.0);
        assert_eq!(config.position_of_time(at(14, 0)), 50.0);
        // 01:00 is the tail of the previous timeline day.
        let pos = config.position_of_time(at(1, 0));
        assert!((pos - (23.0 / 24.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_of_time_clamps_on_short_bar() {
        // 8-hour bar: late evening would map past 100%.
        let config = TimelineConfig::new(9.0, 8.0);
        let late = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        assert_eq!(config.position_of_time(late), 100.0);
    }

    #[test]
    fn test_clamp_position() {
        assert_eq!(clamp_position(-3.0), 0.0);
        assert_eq!(clamp_position(120.0), 100.0);
        assert_eq!(clamp_position(42.5), 42.5);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(360.0), "6h");
        assert_eq!(format_minutes(90.0), "1h 30m");
        assert_eq!(format_minutes(45.0), "45m");
        assert_eq!(format_minutes(0.0), "0m");
        // Display rounds; 29.6 minutes reads as 30m.
        assert_eq!(format_minutes(29.6), "30m");
    }
}
