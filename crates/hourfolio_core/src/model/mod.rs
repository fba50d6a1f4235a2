//! Unified domain model for the time-value tracker.
//!
//! # Responsibility
//! - Define canonical data structures shared by the stores, the slot
//!   resolver and the analytics layer.
//! - Keep derived fields (aggregates, duration, value) distinguishable from
//!   caller-owned fields.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Serialized shapes use camelCase keys and `HH:MM` / `YYYY-MM-DD` strings,
//!   matching the persisted snapshot format.
//!
//! # See also
//! - crate::store for the owning collections and their mutation rules.

pub mod clock;
pub mod date_range;
pub mod project;
pub mod time_box;
pub mod time_log;

pub use clock::{duration_hours, ClockTime, ClockTimeError};
pub use date_range::DateRange;
pub use project::{NewProject, Project, ProjectId, ProjectPatch, ProjectTotals};
pub use time_box::{
    NewTimeBox, Recurrence, TimeBox, TimeBoxId, TimeBoxPatch, TimeBoxValidationError,
};
pub use time_log::{NewTimeLog, TimeLog, TimeLogId, TimeLogPatch};
