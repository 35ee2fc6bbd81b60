//! Per-bout countdown clock.

use serde::{Deserialize, Serialize};

use super::applied::{Applied, Ignored};

/// Default bout duration in minutes.
pub const DEFAULT_MINUTES: u32 = 5;

/// Reading the clock jumps to when encho (overtime) starts.
pub const OVERTIME_CEILING: ClockReading = ClockReading::new(99, 59);

/// A minutes/seconds pair as shown on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockReading {
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockReading {
    pub const fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Clamp untrusted input: minutes to `>= 0`, seconds to `0..=59`.
    pub fn clamped(minutes: i64, seconds: i64) -> Self {
        let minutes = u32::try_from(minutes.max(0)).unwrap_or(u32::MAX);
        let seconds = u32::try_from(seconds.clamp(0, 59)).unwrap_or(0);
        Self { minutes, seconds }
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }
}

impl Default for ClockReading {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES, 0)
    }
}

impl std::fmt::Display for ClockReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Countdown clock with an editable baseline.
///
/// The clock itself never schedules anything: `running` only records that the
/// host should be delivering one [`Clock::tick`] per second. The tokio runtime
/// arms its interval exactly while the active clock is running.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clock {
    current: ClockReading,
    baseline: ClockReading,
    running: bool,
}

impl Clock {
    /// A stopped clock showing `baseline`.
    pub fn new(baseline: ClockReading) -> Self {
        Self {
            current: baseline,
            baseline,
            running: false,
        }
    }

    /// Rebuild a stopped clock from persisted values.
    pub fn restore(current: ClockReading, baseline: ClockReading) -> Self {
        Self {
            current: ClockReading::clamped(current.minutes.into(), current.seconds.into()),
            baseline: ClockReading::clamped(baseline.minutes.into(), baseline.seconds.into()),
            running: false,
        }
    }

    pub fn reading(&self) -> ClockReading {
        self.current
    }

    pub fn baseline(&self) -> ClockReading {
        self.baseline
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start counting down. Refused at 0:00 and while already running.
    pub fn start(&mut self) -> Applied {
        if self.current.is_zero() {
            return Applied::No(Ignored::ClockExpired);
        }
        if self.running {
            return Applied::No(Ignored::ClockRunning);
        }
        self.running = true;
        Applied::Yes
    }

    pub fn stop(&mut self) -> Applied {
        if !self.running {
            return Applied::No(Ignored::ClockStopped);
        }
        self.running = false;
        Applied::Yes
    }

    /// Stop without reporting whether anything changed.
    pub(crate) fn halt(&mut self) {
        self.running = false;
    }

    /// Advance one second. Returns `true` when this tick ran the clock out.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.current.seconds > 0 {
            self.current.seconds -= 1;
        } else if self.current.minutes > 0 {
            self.current.minutes -= 1;
            self.current.seconds = 59;
        }
        if self.current.is_zero() {
            self.running = false;
            return true;
        }
        false
    }

    /// Edit the bout duration. Always stops the clock first.
    pub fn set_baseline(&mut self, minutes: i64, seconds: i64) {
        self.running = false;
        let reading = ClockReading::clamped(minutes, seconds);
        self.current = reading;
        self.baseline = reading;
    }

    /// Put the baseline back on the display. Running state is left alone.
    pub fn reset_to_baseline(&mut self) {
        self.current = self.baseline;
    }

    /// Overwrite the displayed reading without touching the baseline.
    pub(crate) fn set_reading(&mut self, reading: ClockReading) {
        self.current = reading;
    }
}
