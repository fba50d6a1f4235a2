//! Inclusive calendar-date range used by journal and analytics filters.

use chrono::NaiveDate;

/// Optionally bounded, inclusive date window.
///
/// `Default` is the unbounded range, matching queries that aggregate over
/// the whole journal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest date included, when set.
    pub start: Option<NaiveDate>,
    /// Latest date included, when set.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Range bounded on both ends.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Range with no bounds; contains every date.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether `date` falls inside the inclusive window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}
