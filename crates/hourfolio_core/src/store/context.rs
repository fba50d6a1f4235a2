//! Process-wide store context.
//!
//! # Responsibility
//! - Own the three stores over one SQLite connection for the life of the
//!   process, loaded once at startup.
//! - Offer the cross-layer conveniences that wire live store state into the
//!   pure calendar and analytics functions.
//!
//! # Invariants
//! - All three stores share the caller's connection; the caller keeps it
//!   alive for as long as the context exists.
//! - One logical writer at a time; callers on threaded platforms serialize
//!   access around the whole context, not per store.
//!
//! # See also
//! - crate::db::open for producing a ready connection.

use chrono::NaiveDate;
use log::info;
use rusqlite::Connection;

use crate::analytics::{self, AnalyticsSummary};
use crate::calendar::{self, WeekOccupancy};
use crate::model::DateRange;
use crate::store::project_store::ProjectStore;
use crate::store::snapshot::SqliteSnapshotBackend;
use crate::store::time_box_store::TimeBoxStore;
use crate::store::time_log_store::TimeLogStore;
use crate::store::StoreResult;

/// The three stores over one shared connection.
pub struct StoreContext<'conn> {
    pub projects: ProjectStore<SqliteSnapshotBackend<'conn>>,
    pub time_boxes: TimeBoxStore<SqliteSnapshotBackend<'conn>>,
    pub time_logs: TimeLogStore<SqliteSnapshotBackend<'conn>>,
}

impl<'conn> StoreContext<'conn> {
    /// Loads all three stores from their snapshots on a ready connection.
    ///
    /// # Side effects
    /// - Emits a `stores_load` logging event with per-store counts.
    pub fn load(conn: &'conn Connection) -> StoreResult<Self> {
        let projects = ProjectStore::load(SqliteSnapshotBackend::try_new(conn)?)?;
        let time_boxes = TimeBoxStore::load(SqliteSnapshotBackend::try_new(conn)?)?;
        let time_logs = TimeLogStore::load(SqliteSnapshotBackend::try_new(conn)?)?;

        info!(
            "event=stores_load module=store status=ok projects={} time_boxes={} time_logs={}",
            projects.len(),
            time_boxes.len(),
            time_logs.len()
        );

        Ok(Self {
            projects,
            time_boxes,
            time_logs,
        })
    }

    /// Resolves the weekly grid around `anchor` over current store state.
    pub fn resolve_week(&self, anchor: NaiveDate) -> WeekOccupancy<'_> {
        calendar::resolve_week(anchor, self.time_boxes.time_boxes(), self.time_logs.time_logs())
    }

    /// Summarizes the journal over `range` against the current ledger.
    pub fn summarize(&self, range: DateRange) -> AnalyticsSummary<'_> {
        analytics::summarize(range, self.projects.projects(), self.time_logs.time_logs())
    }
}
