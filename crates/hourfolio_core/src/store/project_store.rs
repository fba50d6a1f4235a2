//! Project ledger.
//!
//! # Responsibility
//! - Own the project collection and its caller-facing CRUD surface.
//! - Accept aggregate pushes from the journal through a crate-internal
//!   channel the public patch type cannot reach.
//!
//! # Invariants
//! - New projects start with zeroed aggregates.
//! - The ledger performs no name/rate validation; inputs arrive already
//!   validated at the boundary.
//! - Encounter order is creation order and survives persistence round trips.
//!
//! # See also
//! - crate::store::time_log_store for the single writer of aggregates.

use crate::model::{NewProject, Project, ProjectId, ProjectPatch, ProjectTotals};
use crate::store::snapshot::{self, SnapshotBackend, PROJECT_STORE};
use crate::store::StoreResult;

/// Owning store for projects, persisted as one snapshot per mutation.
#[derive(Debug)]
pub struct ProjectStore<B: SnapshotBackend> {
    backend: B,
    projects: Vec<Project>,
}

impl<B: SnapshotBackend> ProjectStore<B> {
    /// Loads the ledger from its snapshot, starting empty on first run.
    pub fn load(backend: B) -> StoreResult<Self> {
        let projects = snapshot::load_items(&backend, PROJECT_STORE)?;
        Ok(Self { backend, projects })
    }

    /// Appends a new project and returns its generated id.
    pub fn add_project(&mut self, fields: NewProject) -> StoreResult<ProjectId> {
        let project = Project::new(fields);
        let id = project.id;
        self.projects.push(project);
        self.persist()?;
        Ok(id)
    }

    /// Merges the patch into the project; silent no-op when `id` is absent.
    pub fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> StoreResult<()> {
        let Some(project) = self.projects.iter_mut().find(|project| project.id == id) else {
            return Ok(());
        };
        patch.apply_to(project);
        self.persist()
    }

    /// Removes the project; silent no-op when `id` is absent. Time logs
    /// referencing it are left in place and become orphans.
    pub fn delete_project(&mut self, id: ProjectId) -> StoreResult<()> {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != id);
        if self.projects.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Gets one project by id.
    pub fn get_project_by_id(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// All projects in encounter order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Writes journal-computed aggregates; no-op when the project is gone.
    ///
    /// This is the only write path for `total_hours`/`total_value`.
    pub(crate) fn publish_totals(
        &mut self,
        id: ProjectId,
        totals: ProjectTotals,
    ) -> StoreResult<()> {
        let Some(project) = self.projects.iter_mut().find(|project| project.id == id) else {
            return Ok(());
        };
        project.total_hours = totals.hours;
        project.total_value = totals.value;
        self.persist()
    }

    fn persist(&self) -> StoreResult<()> {
        snapshot::save_items(&self.backend, PROJECT_STORE, &self.projects)
    }
}
