//! Per-cell occupancy over the weekly hour grid.
//!
//! # Responsibility
//! - Decide, for each (date, hour) cell, which time box template and which
//!   time log occupy it.
//! - Derive the Monday-start week window around an anchor date.
//!
//! # Invariants
//! - The grid shows hours 6 through 22 inclusive, 17 slots per day.
//! - A cell holds at most one box and at most one log, chosen independently
//!   of each other; first match in encounter order wins for both.
//! - Box matching is hour-granular over `[start hour, end hour)`; log
//!   matching compares the log's start hour only.
//! - Recurrence is evaluated against Sunday-based weekday indices.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{DateRange, TimeBox, TimeLog};

/// First hour shown on the grid.
pub const DISPLAY_START_HOUR: u8 = 6;
/// Last hour shown on the grid, inclusive.
pub const DISPLAY_END_HOUR: u8 = 22;

/// The displayed hour band, `6..=22`.
pub fn display_hours() -> impl Iterator<Item = u8> {
    DISPLAY_START_HOUR..=DISPLAY_END_HOUR
}

/// Sunday-based weekday index for a date, `0..=6`.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// The seven dates of the Monday-start week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    let monday = anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()));
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

/// Inclusive Monday-to-Sunday range of the week containing `anchor`.
///
/// This is the window calendar consumers hand to the analytics aggregator
/// to summarize the visible week.
pub fn week_bounds(anchor: NaiveDate) -> DateRange {
    let dates = week_dates(anchor);
    DateRange::between(dates[0], dates[6])
}

/// Occupancy of one (date, hour) cell.
///
/// Box and log are independent: a cell may show a template background and a
/// logged interval at once, with the log rendered above the template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotCell<'a> {
    pub date: NaiveDate,
    pub hour: u8,
    pub time_box: Option<&'a TimeBox>,
    pub time_log: Option<&'a TimeLog>,
}

/// One day's slice of the grid, 17 slots over the displayed hours.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOccupancy<'a> {
    pub date: NaiveDate,
    /// Sunday-based weekday index of `date`.
    pub weekday_index: u8,
    pub slots: Vec<SlotCell<'a>>,
}

/// Full weekly grid, Monday first.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekOccupancy<'a> {
    pub days: [DayOccupancy<'a>; 7],
}

/// Resolves one cell against the catalog and the journal.
pub fn resolve_slot<'a>(
    date: NaiveDate,
    hour: u8,
    time_boxes: &'a [TimeBox],
    time_logs: &'a [TimeLog],
) -> SlotCell<'a> {
    let weekday = weekday_index(date);

    let time_log = time_logs
        .iter()
        .find(|log| log.date == date && log.start_time.hour() == hour);

    let time_box = time_boxes
        .iter()
        .find(|time_box| time_box.covers_hour(hour) && time_box.recurrence.applies_on(weekday));

    SlotCell {
        date,
        hour,
        time_box,
        time_log,
    }
}

/// Resolves the whole Monday-start week containing `anchor`.
pub fn resolve_week<'a>(
    anchor: NaiveDate,
    time_boxes: &'a [TimeBox],
    time_logs: &'a [TimeLog],
) -> WeekOccupancy<'a> {
    let days = week_dates(anchor).map(|date| DayOccupancy {
        date,
        weekday_index: weekday_index(date),
        slots: display_hours()
            .map(|hour| resolve_slot(date, hour, time_boxes, time_logs))
            .collect(),
    });

    WeekOccupancy { days }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{display_hours, week_bounds, week_dates, weekday_index};

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn display_band_has_seventeen_hours() {
        let hours: Vec<u8> = display_hours().collect();
        assert_eq!(hours.len(), 17);
        assert_eq!(hours.first(), Some(&6));
        assert_eq!(hours.last(), Some(&22));
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        assert_eq!(weekday_index(day("2024-01-07")), 0);
        assert_eq!(weekday_index(day("2024-01-01")), 1);
        assert_eq!(weekday_index(day("2024-01-06")), 6);
    }

    #[test]
    fn week_starts_on_monday_for_a_midweek_anchor() {
        // 2024-01-03 is a Wednesday.
        let dates = week_dates(day("2024-01-03"));
        assert_eq!(dates[0], day("2024-01-01"));
        assert_eq!(dates[6], day("2024-01-07"));
    }

    #[test]
    fn week_of_a_monday_anchor_starts_on_that_day() {
        let dates = week_dates(day("2024-01-01"));
        assert_eq!(dates[0], day("2024-01-01"));
    }

    #[test]
    fn week_of_a_sunday_anchor_reaches_back_to_monday() {
        let dates = week_dates(day("2024-01-07"));
        assert_eq!(dates[0], day("2024-01-01"));
        assert_eq!(dates[6], day("2024-01-07"));
    }

    #[test]
    fn week_bounds_span_monday_to_sunday_inclusive() {
        let range = week_bounds(day("2024-01-03"));
        assert!(range.contains(day("2024-01-01")));
        assert!(range.contains(day("2024-01-07")));
        assert!(!range.contains(day("2023-12-31")));
        assert!(!range.contains(day("2024-01-08")));
    }
}
