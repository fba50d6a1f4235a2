//! Owning stores for projects, time boxes and time logs.
//!
//! # Responsibility
//! - Hold each collection in memory in encounter order and persist it as a
//!   full snapshot after every mutation.
//! - Enforce the cross-store aggregate protocol: every journal mutation ends
//!   by recomputing the touched project's completed totals and publishing
//!   them into the ledger.
//!
//! # Invariants
//! - Update/delete/toggle on an absent id is a silent no-op, never an error.
//! - `add_time_log` against an absent project is the one hard precondition.
//! - Aggregates are only written through `publish_totals`, never by patches.
//!
//! # See also
//! - crate::db for the schema the SQLite snapshot backend expects.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::db::DbError;
use crate::model::{ProjectId, TimeBoxValidationError};

pub mod context;
pub mod project_store;
pub mod snapshot;
pub mod time_box_store;
pub mod time_log_store;

pub use context::StoreContext;
pub use project_store::ProjectStore;
pub use snapshot::{
    SnapshotBackend, SqliteSnapshotBackend, StoredSnapshot, PROJECT_STORE, SNAPSHOT_FORMAT_VERSION,
    TIMEBOX_STORE, TIMELOG_STORE,
};
pub use time_box_store::TimeBoxStore;
pub use time_log_store::TimeLogStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for load, persistence and precondition failures.
#[derive(Debug)]
pub enum StoreError {
    /// Logging a time interval requires an existing project.
    ProjectNotFound(ProjectId),
    /// A time box violated a record-shape invariant.
    InvalidTimeBox(TimeBoxValidationError),
    /// A snapshot payload could not be encoded or decoded.
    Snapshot {
        store: &'static str,
        message: String,
    },
    /// A persisted snapshot was written by a newer format.
    UnsupportedSnapshotVersion {
        store: &'static str,
        found: u32,
        supported: u32,
    },
    /// Connection schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Connection is missing a table the snapshot backend requires.
    MissingRequiredTable(&'static str),
    /// Connection is missing a column the snapshot backend requires.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Storage-layer failure.
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::InvalidTimeBox(err) => write!(f, "{err}"),
            Self::Snapshot { store, message } => {
                write!(f, "snapshot for `{store}` is unreadable: {message}")
            }
            Self::UnsupportedSnapshotVersion {
                store,
                found,
                supported,
            } => write!(
                f,
                "snapshot for `{store}` has format version {found}, newer than supported {supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTimeBox(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TimeBoxValidationError> for StoreError {
    fn from(value: TimeBoxValidationError) -> Self {
        Self::InvalidTimeBox(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
