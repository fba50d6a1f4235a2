//! Time-box catalog.
//!
//! # Responsibility
//! - Own the time-box collection and its caller-facing CRUD surface.
//! - Validate record-shape invariants before any write is committed.
//!
//! # Invariants
//! - A box that fails validation never reaches the collection or the
//!   snapshot; updates validate the merged record before replacing it.
//! - Encounter order is creation order; the slot resolver's first-match
//!   rule depends on it.
//!
//! # See also
//! - crate::calendar for the only consumer of these templates.

use crate::model::{NewTimeBox, TimeBox, TimeBoxId, TimeBoxPatch};
use crate::store::snapshot::{self, SnapshotBackend, TIMEBOX_STORE};
use crate::store::StoreResult;

/// Owning store for time boxes, persisted as one snapshot per mutation.
pub struct TimeBoxStore<B: SnapshotBackend> {
    backend: B,
    time_boxes: Vec<TimeBox>,
}

impl<B: SnapshotBackend> TimeBoxStore<B> {
    /// Loads the catalog from its snapshot, starting empty on first run.
    pub fn load(backend: B) -> StoreResult<Self> {
        let time_boxes = snapshot::load_items(&backend, TIMEBOX_STORE)?;
        Ok(Self {
            backend,
            time_boxes,
        })
    }

    /// Validates and appends a new box, returning its generated id.
    ///
    /// The recurrence rule defaults to everyday when the caller left it
    /// unset.
    pub fn add_time_box(&mut self, fields: NewTimeBox) -> StoreResult<TimeBoxId> {
        let time_box = TimeBox::new(fields);
        time_box.validate()?;
        let id = time_box.id;
        self.time_boxes.push(time_box);
        self.persist()?;
        Ok(id)
    }

    /// Merges the patch into the box; silent no-op when `id` is absent.
    ///
    /// The merged record is validated before it replaces the stored one, so
    /// a rejected patch leaves the catalog untouched.
    pub fn update_time_box(&mut self, id: TimeBoxId, patch: TimeBoxPatch) -> StoreResult<()> {
        let Some(index) = self
            .time_boxes
            .iter()
            .position(|time_box| time_box.id == id)
        else {
            return Ok(());
        };

        let mut updated = self.time_boxes[index].clone();
        patch.apply_to(&mut updated);
        updated.validate()?;

        self.time_boxes[index] = updated;
        self.persist()
    }

    /// Removes the box; silent no-op when `id` is absent. Nothing else
    /// references boxes, so no cascade is involved.
    pub fn delete_time_box(&mut self, id: TimeBoxId) -> StoreResult<()> {
        let before = self.time_boxes.len();
        self.time_boxes.retain(|time_box| time_box.id != id);
        if self.time_boxes.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Gets one box by id.
    pub fn get_time_box_by_id(&self, id: TimeBoxId) -> Option<&TimeBox> {
        self.time_boxes.iter().find(|time_box| time_box.id == id)
    }

    /// All boxes in encounter order.
    pub fn time_boxes(&self) -> &[TimeBox] {
        &self.time_boxes
    }

    pub fn len(&self) -> usize {
        self.time_boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_boxes.is_empty()
    }

    fn persist(&self) -> StoreResult<()> {
        snapshot::save_items(&self.backend, TIMEBOX_STORE, &self.time_boxes)
    }
}
