use chrono::NaiveTime;

use crate::ConfigError;

/// Time-of-day range during which refreshes are allowed.
///
/// Both ends are inclusive. When `start` is later than `end` the window wraps
/// past midnight, e.g. `22:00–02:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl RefreshWindow {
    #[must_use]
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns `true` if `time` falls inside the window.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }
}

impl Default for RefreshWindow {
    /// 10:00–23:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl std::fmt::Display for RefreshWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}–{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parses a `HH:MM` (or `HH:MM:SS`) time-of-day for the env var `var`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if `raw` is not a valid time.
pub fn parse_time_of_day(var: &str, raw: &str) -> Result<NaiveTime, ConfigError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected HH:MM, got \"{raw}\": {e}"),
        })
}
