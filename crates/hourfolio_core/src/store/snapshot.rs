//! Snapshot persistence boundary for the stores.
//!
//! # Responsibility
//! - Define the backend contract for loading and saving one store's full
//!   state as an opaque versioned payload keyed by store name.
//! - Provide the SQLite implementation over the `store_snapshots` table.
//!
//! # Invariants
//! - One row per store name; saving replaces the previous payload in place.
//! - Payloads are the JSON array of the store's records in encounter order.
//! - A payload written by a newer format version is rejected, not guessed at.
//!
//! # See also
//! - crate::db::migrations for the schema this backend checks on startup.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::{migrations, DbError};
use crate::store::{StoreError, StoreResult};

/// Format version stamped on every snapshot this binary writes.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Snapshot key for the project ledger.
pub const PROJECT_STORE: &str = "project-store";
/// Snapshot key for the time-box catalog.
pub const TIMEBOX_STORE: &str = "timebox-store";
/// Snapshot key for the time-log journal.
pub const TIMELOG_STORE: &str = "timelog-store";

/// One store's persisted state as read from or written to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSnapshot {
    pub format_version: u32,
    pub payload: String,
}

/// Backend contract for snapshot-per-store persistence.
pub trait SnapshotBackend {
    /// Loads the snapshot for `store_name`, `None` when never saved.
    fn load(&self, store_name: &'static str) -> StoreResult<Option<StoredSnapshot>>;
    /// Saves the snapshot for `store_name`, replacing any previous one.
    fn save(&self, store_name: &'static str, snapshot: &StoredSnapshot) -> StoreResult<()>;
}

/// SQLite-backed snapshot storage.
#[derive(Debug)]
pub struct SqliteSnapshotBackend<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotBackend<'conn> {
    /// Constructs a backend from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_snapshot_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SnapshotBackend for SqliteSnapshotBackend<'_> {
    fn load(&self, store_name: &'static str) -> StoreResult<Option<StoredSnapshot>> {
        let snapshot = self
            .conn
            .query_row(
                "SELECT format_version, payload
                 FROM store_snapshots
                 WHERE store_name = ?1;",
                [store_name],
                |row| {
                    Ok(StoredSnapshot {
                        format_version: row.get(0)?,
                        payload: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(snapshot)
    }

    fn save(&self, store_name: &'static str, snapshot: &StoredSnapshot) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO store_snapshots (store_name, format_version, payload)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(store_name) DO UPDATE SET
                format_version = excluded.format_version,
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![store_name, snapshot.format_version, snapshot.payload],
        )?;
        Ok(())
    }
}

/// Decodes a store's record list from its snapshot, empty on first run.
pub(crate) fn load_items<T, B>(backend: &B, store_name: &'static str) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    B: SnapshotBackend,
{
    let Some(snapshot) = backend.load(store_name)? else {
        return Ok(Vec::new());
    };

    if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
        return Err(StoreError::UnsupportedSnapshotVersion {
            store: store_name,
            found: snapshot.format_version,
            supported: SNAPSHOT_FORMAT_VERSION,
        });
    }

    serde_json::from_str(&snapshot.payload).map_err(|err| StoreError::Snapshot {
        store: store_name,
        message: err.to_string(),
    })
}

/// Encodes a store's record list and hands it to the backend.
pub(crate) fn save_items<T, B>(
    backend: &B,
    store_name: &'static str,
    items: &[T],
) -> StoreResult<()>
where
    T: Serialize,
    B: SnapshotBackend,
{
    let payload = serde_json::to_string(items).map_err(|err| StoreError::Snapshot {
        store: store_name,
        message: err.to_string(),
    })?;
    backend.save(
        store_name,
        &StoredSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            payload,
        },
    )
}

fn ensure_snapshot_connection_ready(conn: &Connection) -> StoreResult<()> {
    let actual_version = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(DbError::Sqlite)?;
    let expected_version = migrations::latest_version();
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "store_snapshots")? {
        return Err(StoreError::MissingRequiredTable("store_snapshots"));
    }

    for column in ["store_name", "format_version", "payload"] {
        if !table_has_column(conn, "store_snapshots", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "store_snapshots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
