//! Project domain model.
//!
//! # Responsibility
//! - Define the billable-endeavor record and its caller-facing input shapes.
//! - Keep the derived portfolio aggregates distinct from caller-owned fields.
//!
//! # Invariants
//! - `id` is stable and never reused for another project.
//! - `total_hours`/`total_value` are derived from completed time logs and
//!   are only ever written through the journal's aggregate push.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// A billable/valuable endeavor with an hourly rate.
///
/// The aggregate fields mirror the sums over this project's *completed* time
/// logs; planned logs contribute nothing until toggled done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable global ID.
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    /// Display token, opaque to the core.
    pub color: String,
    /// Value of one logged hour.
    pub hourly_rate: f64,
    /// Derived: completed hours across this project's logs.
    pub total_hours: f64,
    /// Derived: completed value across this project's logs.
    pub total_value: f64,
}

impl Project {
    /// Creates a project with a generated stable ID and zeroed aggregates.
    pub fn new(fields: NewProject) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            color: fields.color,
            hourly_rate: fields.hourly_rate,
            total_hours: 0.0,
            total_value: 0.0,
        }
    }
}

/// Caller-settable fields for creating a project.
///
/// The ledger performs no name/rate validation; that stays a boundary
/// concern of the collaborator collecting the input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub color: String,
    pub hourly_rate: f64,
}

/// Partial update for a project; `None` fields keep their current value.
///
/// Aggregates are absent on purpose: they are derived state owned by the
/// journal's recompute-and-publish step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub hourly_rate: Option<f64>,
}

impl ProjectPatch {
    /// Merges the set fields into `project`.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(color) = self.color {
            project.color = color;
        }
        if let Some(hourly_rate) = self.hourly_rate {
            project.hourly_rate = hourly_rate;
        }
    }
}

/// Completed-only aggregate pair pushed from the journal into the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectTotals {
    pub hours: f64,
    pub value: f64,
}
