//! Time-log journal.
//!
//! # Responsibility
//! - Own the time-log collection, derive `duration`/`value` on every write
//!   and keep the ledger's per-project aggregates in step.
//! - Answer the date/project queries the calendar and analytics layers use.
//!
//! # Invariants
//! - Every mutation ends by recomputing the touched project's completed
//!   totals from the full current log set and publishing them to the ledger,
//!   before the operation returns.
//! - Per-project totals count completed logs only; the global total counts
//!   planned and completed alike. The asymmetry is deliberate: planned value
//!   is visible globally, portfolio credit arrives on completion.
//! - `value` is priced at the owning project's rate at write time and is
//!   never re-derived by reads or by later rate changes.
//!
//! # See also
//! - crate::store::project_store for the aggregate publish channel.

use chrono::NaiveDate;

use crate::model::{
    DateRange, NewTimeLog, ProjectId, ProjectTotals, TimeLog, TimeLogId, TimeLogPatch,
};
use crate::store::project_store::ProjectStore;
use crate::store::snapshot::{self, SnapshotBackend, TIMELOG_STORE};
use crate::store::{StoreError, StoreResult};

/// Owning store for time logs, persisted as one snapshot per mutation.
pub struct TimeLogStore<B: SnapshotBackend> {
    backend: B,
    time_logs: Vec<TimeLog>,
}

impl<B: SnapshotBackend> TimeLogStore<B> {
    /// Loads the journal from its snapshot, starting empty on first run.
    pub fn load(backend: B) -> StoreResult<Self> {
        let time_logs = snapshot::load_items(&backend, TIMELOG_STORE)?;
        Ok(Self { backend, time_logs })
    }

    /// Logs a planned interval against a project and returns the log id.
    ///
    /// The project must exist; this is the journal's one hard precondition.
    /// An inverted interval is not rejected here, it just derives a negative
    /// duration. The new log always starts as planned, whatever the caller
    /// intended.
    pub fn add_time_log<P: SnapshotBackend>(
        &mut self,
        fields: NewTimeLog,
        projects: &mut ProjectStore<P>,
    ) -> StoreResult<TimeLogId> {
        let hourly_rate = projects
            .get_project_by_id(fields.project_id)
            .ok_or(StoreError::ProjectNotFound(fields.project_id))?
            .hourly_rate;

        let log = TimeLog::new(fields, hourly_rate);
        let id = log.id;
        let project_id = log.project_id;
        self.time_logs.push(log);
        self.persist()?;
        self.push_totals(project_id, projects)?;
        Ok(id)
    }

    /// Merges the patch into the log, re-deriving `duration` and `value` at
    /// the current rate of the log's project as it was before the merge.
    ///
    /// Silent no-op when the id is absent or the log's project is gone.
    /// When the patch moves the log to another project, both the prior and
    /// the new project get fresh totals.
    pub fn update_time_log<P: SnapshotBackend>(
        &mut self,
        id: TimeLogId,
        patch: TimeLogPatch,
        projects: &mut ProjectStore<P>,
    ) -> StoreResult<()> {
        let Some(index) = self.time_logs.iter().position(|log| log.id == id) else {
            return Ok(());
        };
        let prior_project_id = self.time_logs[index].project_id;
        let Some(hourly_rate) = projects
            .get_project_by_id(prior_project_id)
            .map(|project| project.hourly_rate)
        else {
            return Ok(());
        };

        let moved_to = patch
            .project_id
            .filter(|project_id| *project_id != prior_project_id);

        let log = &mut self.time_logs[index];
        patch.apply_to(log);
        log.reprice(hourly_rate);

        self.persist()?;
        self.push_totals(prior_project_id, projects)?;
        if let Some(new_project_id) = moved_to {
            self.push_totals(new_project_id, projects)?;
        }
        Ok(())
    }

    /// Removes the log; silent no-op when `id` is absent. The owning
    /// project's totals reflect the post-deletion state.
    pub fn delete_time_log<P: SnapshotBackend>(
        &mut self,
        id: TimeLogId,
        projects: &mut ProjectStore<P>,
    ) -> StoreResult<()> {
        let Some(index) = self.time_logs.iter().position(|log| log.id == id) else {
            return Ok(());
        };
        let project_id = self.time_logs[index].project_id;
        self.time_logs.remove(index);
        self.persist()?;
        self.push_totals(project_id, projects)
    }

    /// Flips a log between planned and completed; silent no-op when `id` is
    /// absent. This is the only mutation of the completion flag.
    pub fn toggle_completion<P: SnapshotBackend>(
        &mut self,
        id: TimeLogId,
        projects: &mut ProjectStore<P>,
    ) -> StoreResult<()> {
        let Some(index) = self.time_logs.iter().position(|log| log.id == id) else {
            return Ok(());
        };
        let log = &mut self.time_logs[index];
        log.is_completed = !log.is_completed;
        let project_id = log.project_id;
        self.persist()?;
        self.push_totals(project_id, projects)
    }

    /// Logs dated exactly `date`, in encounter order.
    pub fn logs_by_date(&self, date: NaiveDate) -> Vec<&TimeLog> {
        self.time_logs.iter().filter(|log| log.date == date).collect()
    }

    /// Logs owned by `project_id`, in encounter order.
    pub fn logs_by_project(&self, project_id: ProjectId) -> Vec<&TimeLog> {
        self.time_logs
            .iter()
            .filter(|log| log.project_id == project_id)
            .collect()
    }

    /// Sum of `value` over all logs in the range, planned and completed
    /// alike.
    pub fn total_value(&self, range: DateRange) -> f64 {
        self.time_logs
            .iter()
            .filter(|log| range.contains(log.date))
            .map(|log| log.value)
            .sum()
    }

    /// Sum of `duration` over the project's completed logs.
    pub fn project_total_hours(&self, project_id: ProjectId) -> f64 {
        self.completed_for(project_id).map(|log| log.duration).sum()
    }

    /// Sum of `value` over the project's completed logs.
    pub fn project_total_value(&self, project_id: ProjectId) -> f64 {
        self.completed_for(project_id).map(|log| log.value).sum()
    }

    /// All logs in encounter order.
    pub fn time_logs(&self) -> &[TimeLog] {
        &self.time_logs
    }

    pub fn len(&self) -> usize {
        self.time_logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_logs.is_empty()
    }

    fn completed_for(&self, project_id: ProjectId) -> impl Iterator<Item = &TimeLog> {
        self.time_logs
            .iter()
            .filter(move |log| log.project_id == project_id && log.is_completed)
    }

    fn push_totals<P: SnapshotBackend>(
        &self,
        project_id: ProjectId,
        projects: &mut ProjectStore<P>,
    ) -> StoreResult<()> {
        let totals = ProjectTotals {
            hours: self.project_total_hours(project_id),
            value: self.project_total_value(project_id),
        };
        projects.publish_totals(project_id, totals)
    }

    fn persist(&self) -> StoreResult<()> {
        snapshot::save_items(&self.backend, TIMELOG_STORE, &self.time_logs)
    }
}
