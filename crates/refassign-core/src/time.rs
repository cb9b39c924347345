//! Half-open time windows for matches, travel, and unavailability.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::{RefAssignError, Result};

/// Length of a match when the input gives only a start time.
pub const DEFAULT_MATCH_MINUTES: i64 = 120;

/// A time interval `[start, end)`.
///
/// Two windows overlap unless one ends at or before the moment the other
/// starts, so back-to-back windows are compatible.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window, rejecting empty or reversed intervals.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(RefAssignError::invalid(format!(
                "time window must end after it starts ({} .. {})",
                start, end
            )));
        }
        Ok(TimeWindow { start, end })
    }

    /// Creates a window of `minutes` length starting at `start`.
    ///
    /// A non-positive length yields an empty window that overlaps nothing.
    pub fn starting_at(start: NaiveDateTime, minutes: i64) -> Self {
        let end = start + TimeDelta::minutes(minutes.max(0));
        TimeWindow { start, end }
    }

    /// Creates a match window of the default length.
    pub fn default_match(start: NaiveDateTime) -> Self {
        Self::starting_at(start, DEFAULT_MATCH_MINUTES)
    }

    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    #[inline]
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Returns true if the two windows share any instant.
    #[inline]
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// Returns true if both windows start on the same calendar day.
    #[inline]
    pub fn same_start_day(&self, other: &TimeWindow) -> bool {
        self.start.date() == other.start.date()
    }
}

impl fmt::Debug for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeWindow({})", self)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DATE: &str = "%-d/%-m/%Y";
        const TIME: &str = "%H:%M";
        if self.start.date() == self.end.date() {
            write!(
                f,
                "{} {}-{}",
                self.start.format(DATE),
                self.start.format(TIME),
                self.end.format(TIME)
            )
        } else {
            write!(
                f,
                "{} {}~{} {}",
                self.start.format(DATE),
                self.start.format(TIME),
                self.end.format(DATE),
                self.end.format(TIME)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = TimeWindow::new(at(1, 10, 0), at(1, 12, 0)).unwrap();
        let b = TimeWindow::new(at(1, 12, 0), at(1, 14, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_nested_windows_overlap() {
        let a = TimeWindow::new(at(1, 10, 0), at(1, 18, 0)).unwrap();
        let b = TimeWindow::new(at(1, 12, 0), at(1, 13, 0)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_reversed_window_rejected() {
        assert!(TimeWindow::new(at(1, 12, 0), at(1, 12, 0)).is_err());
        assert!(TimeWindow::new(at(2, 12, 0), at(1, 12, 0)).is_err());
    }

    #[test]
    fn test_empty_travel_window_overlaps_nothing() {
        let travel = TimeWindow::starting_at(at(1, 12, 0), 0);
        let next = TimeWindow::new(at(1, 12, 0), at(1, 14, 0)).unwrap();
        assert!(!travel.overlaps(&next));
    }

    #[test]
    fn test_default_match_spans_midnight() {
        let w = TimeWindow::default_match(at(1, 23, 0));
        assert_eq!(w.end(), at(2, 1, 0));
        assert_eq!(w.to_string(), "1/3/2024 23:00~2/3/2024 01:00");
    }

    #[test]
    fn test_display_same_day() {
        let w = TimeWindow::new(at(5, 9, 5), at(5, 11, 0)).unwrap();
        assert_eq!(w.to_string(), "5/3/2024 09:05-11:00");
        assert_eq!(w.minutes(), 115);
    }
}
