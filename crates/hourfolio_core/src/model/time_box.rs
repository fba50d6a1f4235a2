//! Time-box domain model.
//!
//! # Responsibility
//! - Define the recurring planned-block record, its recurrence rule and the
//!   hour-window test the calendar resolver leans on.
//! - Validate record-shape invariants before a box is admitted to the catalog.
//!
//! # Invariants
//! - `end_time` is strictly after `start_time` at minute precision.
//! - `opacity` stays within the render-safe band `0.1..=0.5`.
//! - Custom recurrence only carries weekday indices `0..=6` (Sunday = 0).
//! - The wire shape keeps `recurrence`/`customDays` as sibling keys of the
//!   record, with `customDays` present only for the `custom` rule.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::clock::ClockTime;

/// Stable identifier for a time box.
pub type TimeBoxId = Uuid;

/// Violations of the catalog's record-shape invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBoxValidationError {
    /// `end_time` must be strictly after `start_time`.
    EndNotAfterStart { start: ClockTime, end: ClockTime },
    /// Opacity outside the render-safe band `0.1..=0.5`.
    OpacityOutOfRange(f64),
    /// Custom recurrence carried a weekday index above 6.
    InvalidWeekday(u8),
}

impl fmt::Display for TimeBoxValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBoxValidationError::EndNotAfterStart { start, end } => {
                write!(f, "time box must end after it starts (start {start}, end {end})")
            }
            TimeBoxValidationError::OpacityOutOfRange(opacity) => {
                write!(f, "time box opacity {opacity} outside 0.1..=0.5")
            }
            TimeBoxValidationError::InvalidWeekday(day) => {
                write!(f, "custom recurrence weekday {day} outside 0..=6")
            }
        }
    }
}

impl Error for TimeBoxValidationError {}

/// Which weekdays a time box applies to.
///
/// Serialized as a `recurrence` tag beside the record's own fields; the
/// `custom` rule adds a `customDays` key holding Sunday-based indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "recurrence", rename_all = "lowercase")]
pub enum Recurrence {
    /// Applies on all seven weekdays.
    Everyday,
    /// Applies Monday through Friday.
    Workdays,
    /// Applies on an explicit weekday set, Sunday = 0.
    Custom {
        #[serde(rename = "customDays")]
        custom_days: BTreeSet<u8>,
    },
}

impl Recurrence {
    /// True when the rule covers the given Sunday-based weekday index.
    pub fn applies_on(&self, weekday_index: u8) -> bool {
        match self {
            Recurrence::Everyday => true,
            Recurrence::Workdays => (1..=5).contains(&weekday_index),
            Recurrence::Custom { custom_days } => custom_days.contains(&weekday_index),
        }
    }
}

/// A recurring planned block of the day, matched to calendar slots by hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBox {
    /// Stable global ID.
    pub id: TimeBoxId,
    pub name: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// Display token, opaque to the core.
    pub color: String,
    /// Render opacity, `0.1..=0.5`.
    pub opacity: f64,
    #[serde(flatten)]
    pub recurrence: Recurrence,
}

impl TimeBox {
    /// Creates a box with a generated stable ID, defaulting the recurrence
    /// rule to everyday when the caller left it unset.
    pub fn new(fields: NewTimeBox) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            start_time: fields.start_time,
            end_time: fields.end_time,
            color: fields.color,
            opacity: fields.opacity,
            recurrence: fields.recurrence.unwrap_or(Recurrence::Everyday),
        }
    }

    /// Checks the record-shape invariants; run before any catalog write.
    pub fn validate(&self) -> Result<(), TimeBoxValidationError> {
        if self.end_time <= self.start_time {
            return Err(TimeBoxValidationError::EndNotAfterStart {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if !(0.1..=0.5).contains(&self.opacity) {
            return Err(TimeBoxValidationError::OpacityOutOfRange(self.opacity));
        }
        if let Recurrence::Custom { custom_days } = &self.recurrence {
            if let Some(&day) = custom_days.iter().find(|&&day| day > 6) {
                return Err(TimeBoxValidationError::InvalidWeekday(day));
            }
        }
        Ok(())
    }

    /// True when the display hour falls inside `[start hour, end hour)`.
    ///
    /// Minutes are ignored on purpose: slot matching is hour-granular even
    /// though the box boundaries carry minutes.
    pub fn covers_hour(&self, hour: u8) -> bool {
        self.start_time.hour() <= hour && hour < self.end_time.hour()
    }
}

/// Caller-settable fields for creating a time box.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeBox {
    pub name: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub color: String,
    pub opacity: f64,
    /// Defaults to [`Recurrence::Everyday`] when `None`.
    pub recurrence: Option<Recurrence>,
}

/// Partial update for a time box; `None` fields keep their current value.
///
/// Setting `recurrence` replaces the whole rule, custom day set included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeBoxPatch {
    pub name: Option<String>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    pub color: Option<String>,
    pub opacity: Option<f64>,
    pub recurrence: Option<Recurrence>,
}

impl TimeBoxPatch {
    /// Merges the set fields into `time_box`.
    pub fn apply_to(self, time_box: &mut TimeBox) {
        if let Some(name) = self.name {
            time_box.name = name;
        }
        if let Some(start_time) = self.start_time {
            time_box.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            time_box.end_time = end_time;
        }
        if let Some(color) = self.color {
            time_box.color = color;
        }
        if let Some(opacity) = self.opacity {
            time_box.opacity = opacity;
        }
        if let Some(recurrence) = self.recurrence {
            time_box.recurrence = recurrence;
        }
    }
}
