//! Core domain logic for Hourfolio.
//! This crate is the single source of truth for business invariants.

pub mod analytics;
pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use analytics::{
    summarize, AnalyticsSummary, HighValueSplit, ProjectStat, HIGH_VALUE_RATE_THRESHOLD,
};
pub use calendar::{
    resolve_slot, resolve_week, week_bounds, week_dates, DayOccupancy, SlotCell, WeekOccupancy,
    DISPLAY_END_HOUR, DISPLAY_START_HOUR,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    duration_hours, ClockTime, ClockTimeError, DateRange, NewProject, NewTimeBox, NewTimeLog,
    Project, ProjectId, ProjectPatch, Recurrence, TimeBox, TimeBoxId, TimeBoxPatch,
    TimeBoxValidationError, TimeLog, TimeLogId, TimeLogPatch,
};
pub use store::{
    ProjectStore, SnapshotBackend, SqliteSnapshotBackend, StoreContext, StoreError, StoreResult,
    TimeBoxStore, TimeLogStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
