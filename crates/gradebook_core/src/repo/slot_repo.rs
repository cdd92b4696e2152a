//! Slot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and overwrite named string slots in the `slots` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write_slot` is a single upsert; readers never observe a partial payload.
//! - Missing slots read as `None`, not as an error.

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Named location in the key-value store holding one serialized collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Students,
    Grades,
}

impl Slot {
    /// Stable storage key for this slot.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Grades => "grades",
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository error for slot reads, writes and payload decoding.
#[derive(Debug)]
pub enum RepoError {
    /// The durable store could not be read or written.
    Db(DbError),
    /// Slot content could not be encoded or decoded.
    Parse { slot: Slot, message: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Parse { slot, message } => {
                write!(f, "invalid payload in slot `{slot}`: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Parse { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for named string slots.
pub trait SlotRepository {
    /// Returns the raw payload of `slot`, or `None` when it was never written.
    fn read_slot(&self, slot: Slot) -> RepoResult<Option<String>>;
    /// Overwrites `slot` with `payload`.
    fn write_slot(&self, slot: Slot, payload: &str) -> RepoResult<()>;
}

impl<R: SlotRepository + ?Sized> SlotRepository for &R {
    fn read_slot(&self, slot: Slot) -> RepoResult<Option<String>> {
        (**self).read_slot(slot)
    }

    fn write_slot(&self, slot: Slot, payload: &str) -> RepoResult<()> {
        (**self).write_slot(slot, payload)
    }
}

/// SQLite-backed slot repository over a migrated connection.
///
/// Cheap to copy; both stores share one connection through it.
#[derive(Debug, Clone, Copy)]
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, slot: Slot) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1;",
                [slot.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&self, slot: Slot, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (name, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![slot.as_str(), payload],
        )?;
        debug!(
            "event=slot_write module=repo status=ok slot={} bytes={}",
            slot,
            payload.len()
        );
        Ok(())
    }
}
