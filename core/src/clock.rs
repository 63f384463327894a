//! Mission clock and wall-clock time sources.
//!
//! The mission clock counts elapsed seconds since mission start and is only
//! ever advanced one second at a time. Wall-clock time is used solely to
//! stamp operation log entries and is injected so tests can pin it.

use crate::types::Tick;
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissionClock {
    pub elapsed_seconds: Tick,
}

impl MissionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one second. Returns the new elapsed count.
    pub fn advance(&mut self) -> Tick {
        self.elapsed_seconds = self.elapsed_seconds.wrapping_add(1);
        self.elapsed_seconds
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// `"{d}d {HH}h {MM}m {SS}s"`, days unpadded.
pub fn format_elapsed(seconds: Tick) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let mins = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    format!("{days}d {hours:02}h {mins:02}m {secs:02}s")
}

/// Source of the time-of-day stamp on operation log entries.
pub trait WallClock: Send {
    fn now(&self) -> NaiveTime;

    /// `HH:MM:SS`, 24-hour.
    fn time_of_day(&self) -> String {
        self.now().format("%H:%M:%S").to_string()
    }
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedWallClock(pub NaiveTime);

impl FixedWallClock {
    pub fn at(hour: u32, min: u32, sec: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour, min, sec).unwrap_or(NaiveTime::MIN))
    }
}

impl WallClock for FixedWallClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_by_one() {
        let mut clock = MissionClock::new();
        for expected in 1..=10 {
            assert_eq!(clock.advance(), expected);
        }
        assert_eq!(clock.elapsed_seconds, 10);
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0d 00h 00m 00s");
        assert_eq!(format_elapsed(59), "0d 00h 00m 59s");
        assert_eq!(format_elapsed(3_661), "0d 01h 01m 01s");
        assert_eq!(format_elapsed(90_061), "1d 01h 01m 01s");
        assert_eq!(format_elapsed(864_000), "10d 00h 00m 00s");
    }

    #[test]
    fn fixed_wall_clock_formats_hms() {
        assert_eq!(FixedWallClock::at(9, 5, 7).time_of_day(), "09:05:07");
        assert_eq!(FixedWallClock::at(23, 59, 59).time_of_day(), "23:59:59");
    }
}
