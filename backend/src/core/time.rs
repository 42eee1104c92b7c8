//! Coverage window for generated timestamps
//!
//! Timestamps are drawn from a one-year window starting at a fixed instant.
//! A random timestamp is the window start plus a random day, hour and minute,
//! so seconds are always zero.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::rng::RngManager;

/// Wire format for timestamps in fixture files
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date range timestamps are sampled from
///
/// # Example
/// ```
/// use txn_fixture_core::CoverageWindow;
/// use txn_fixture_core::RngManager;
///
/// let window = CoverageWindow::default();
/// let mut rng = RngManager::new(1);
/// let ts = window.random_timestamp(&mut rng);
/// assert!(window.contains(ts));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageWindow {
    /// First instant of the window
    start: NaiveDateTime,
    /// Largest day offset from `start` (inclusive)
    max_day_offset: i64,
}

impl Default for CoverageWindow {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("2023-01-01 00:00:00 is a valid datetime");
        Self::new(start, 365)
    }
}

impl CoverageWindow {
    /// # Panics
    /// Panics if `max_day_offset` is negative
    pub fn new(start: NaiveDateTime, max_day_offset: i64) -> Self {
        assert!(max_day_offset >= 0, "max_day_offset must be non-negative");
        Self {
            start,
            max_day_offset,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Last instant a sampled timestamp can take
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::days(self.max_day_offset) + Duration::hours(23) + Duration::minutes(59)
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end()
    }

    /// Uniform day, hour and minute within the window
    pub fn random_timestamp(&self, rng: &mut RngManager) -> NaiveDateTime {
        let minute = rng.range_inclusive(0, 59);
        self.random_hour(rng) + Duration::minutes(minute)
    }

    /// Uniform day and hour within the window, on the hour
    pub fn random_hour(&self, rng: &mut RngManager) -> NaiveDateTime {
        let day = rng.range_inclusive(0, self.max_day_offset);
        let hour = rng.range_inclusive(0, 23);
        self.start + Duration::days(day) + Duration::hours(hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_default_window_covers_2023() {
        let window = CoverageWindow::default();
        assert_eq!(window.start().format(TIMESTAMP_FORMAT).to_string(), "2023-01-01 00:00:00");
        assert_eq!(window.end().format(TIMESTAMP_FORMAT).to_string(), "2024-01-01 23:59:00");
    }

    #[test]
    fn test_random_timestamps_in_window_with_zero_seconds() {
        let window = CoverageWindow::default();
        let mut rng = RngManager::new(31337);

        for _ in 0..1000 {
            let ts = window.random_timestamp(&mut rng);
            assert!(window.contains(ts));
            assert_eq!(ts.second(), 0);
        }
    }

    #[test]
    fn test_random_hour_is_on_the_hour() {
        let window = CoverageWindow::default();
        let mut rng = RngManager::new(8);

        for _ in 0..200 {
            let ts = window.random_hour(&mut rng);
            assert!(window.contains(ts));
            assert_eq!(ts.minute(), 0);
        }
    }
}
