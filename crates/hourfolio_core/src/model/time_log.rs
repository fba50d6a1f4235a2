//! Time-log domain model.
//!
//! # Responsibility
//! - Define the dated worked-interval record and its derivation rules for
//!   `duration` and `value`.
//! - Keep the derived fields out of the caller-facing input shapes.
//!
//! # Invariants
//! - `duration` is `(end - start)` in hours at minute precision; it is not
//!   clamped and may be zero or negative when fed an inverted interval.
//! - `value` is priced at the owning project's rate *at derivation time* and
//!   is never silently re-derived when that rate later changes.
//! - `is_completed` starts false and is only ever flipped by the journal's
//!   toggle operation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::clock::{duration_hours, ClockTime, ClockTimeError};
use crate::model::project::ProjectId;

/// Stable identifier for a time log.
pub type TimeLogId = Uuid;

/// A concrete, dated interval of worked time against a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLog {
    /// Stable global ID.
    pub id: TimeLogId,
    pub project_id: ProjectId,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// Derived: `(end - start)` in hours.
    pub duration: f64,
    /// Derived: `duration * hourly_rate` at the last derivation.
    pub value: f64,
    /// False on creation; flipped only through the journal toggle.
    pub is_completed: bool,
}

impl TimeLog {
    /// Creates a planned log with a generated stable ID, deriving `duration`
    /// and `value` from the interval and the given rate.
    pub fn new(fields: NewTimeLog, hourly_rate: f64) -> Self {
        let mut log = Self {
            id: Uuid::new_v4(),
            project_id: fields.project_id,
            date: fields.date,
            start_time: fields.start_time,
            end_time: fields.end_time,
            duration: 0.0,
            value: 0.0,
            is_completed: false,
        };
        log.reprice(hourly_rate);
        log
    }

    /// Re-derives `duration` and `value` from the current interval and the
    /// given rate. Called on creation and on every journal update.
    pub fn reprice(&mut self, hourly_rate: f64) {
        self.duration = duration_hours(self.start_time, self.end_time);
        self.value = self.duration * hourly_rate;
    }
}

/// Caller-settable fields for logging an interval.
///
/// `duration`, `value` and `is_completed` are absent on purpose: the journal
/// derives the first two and always starts a log as planned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeLog {
    pub project_id: ProjectId,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl NewTimeLog {
    /// Input for the drop-on-slot gesture: a one-hour interval starting on
    /// the slot's hour.
    pub fn for_slot(
        project_id: ProjectId,
        date: NaiveDate,
        hour: u8,
    ) -> Result<Self, ClockTimeError> {
        Ok(Self {
            project_id,
            date,
            start_time: ClockTime::new(hour, 0)?,
            end_time: ClockTime::new(hour + 1, 0)?,
        })
    }
}

/// Partial update for a time log; `None` fields keep their current value.
///
/// Derived fields and the completion flag are not patchable here; the
/// journal re-derives the former and owns the latter via its toggle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeLogPatch {
    pub project_id: Option<ProjectId>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

impl TimeLogPatch {
    /// Merges the set fields into `log`. Derivation stays with the caller.
    pub fn apply_to(self, log: &mut TimeLog) {
        if let Some(project_id) = self.project_id {
            log.project_id = project_id;
        }
        if let Some(date) = self.date {
            log.date = date;
        }
        if let Some(start_time) = self.start_time {
            log.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            log.end_time = end_time;
        }
    }
}
