//! # Key-Value Store
//!
//! Durable substrate for notes and favorites, backed by a single SQLite
//! table of `(partition, sort, value)` records.
//!
//! ## Addressing
//!
//! Every record is addressed by a `(partition, sort)` pair; the pair is
//! unique, and enumerating a partition yields its records ordered by sort
//! key. Callers build structured sort keys by plain string concatenation
//! (e.g. `date_starttime_id` for chronologically ordered favorites).
//!
//! The reserved `config` partition holds a single `schema` record written
//! once at first initialization.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Current on-disk schema version, written to `config`/`schema` on first use.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An `insert` hit an existing `(partition, sort)` pair. The stored
    /// value is left untouched. Callers with ensure-present semantics
    /// catch and ignore this.
    #[error("duplicate key: {partition}/{sort}")]
    DuplicateKey { partition: String, sort: String },

    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// One stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub partition: String,
    pub sort: String,
    pub value: String,
}

/// Handle to the on-disk store. One connection, synchronous writes,
/// single writer by construction (one event loop drives all mutation).
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (and if necessary initialize) the store at `path`.
    ///
    /// Initialization is idempotent: the table and the schema record are
    /// created exactly once; on an already-initialized store this is a
    /// no-op read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// In-memory store, used by tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS records (
              partition TEXT NOT NULL,
              sort      TEXT NOT NULL,
              value     TEXT NOT NULL,
              UNIQUE(partition, sort)
            );
            "#,
        )?;

        if self.get("config", "schema")?.is_none() {
            tracing::info!(version = SCHEMA_VERSION, "initializing store schema");
            self.insert("config", "schema", &SCHEMA_VERSION.to_string())?;
        }
        Ok(())
    }

    /// The schema version recorded at first initialization.
    pub fn schema_version(&self) -> Result<Option<String>> {
        self.get("config", "schema")
    }

    /// Look up one value. Absence is not an error.
    pub fn get(&self, partition: &str, sort: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE partition = ?1 AND sort = ?2",
                params![partition, sort],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// All records of a partition, ordered by sort key.
    pub fn get_partition(&self, partition: &str) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT partition, sort, value FROM records
             WHERE partition = ?1 ORDER BY sort",
        )?;
        let rows = stmt.query_map(params![partition], |row| {
            Ok(Record {
                partition: row.get(0)?,
                sort: row.get(1)?,
                value: row.get(2)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Insert a new record. Fails with [`StoreError::DuplicateKey`] if the
    /// `(partition, sort)` pair already exists; the stored value is never
    /// mutated by a failed insert.
    pub fn insert(&self, partition: &str, sort: &str, value: &str) -> Result<()> {
        match self.conn.execute(
            "INSERT INTO records (partition, sort, value) VALUES (?1, ?2, ?3)",
            params![partition, sort, value],
        ) {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateKey {
                    partition: partition.to_string(),
                    sort: sort.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing record. Silently affects zero rows when the pair
    /// does not exist; callers must not rely on update to detect absence.
    pub fn update(&self, partition: &str, sort: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE records SET value = ?3 WHERE partition = ?1 AND sort = ?2",
            params![partition, sort, value],
        )?;
        Ok(())
    }

    /// Remove a record. Like `update`, a silent no-op on an absent pair.
    pub fn delete(&self, partition: &str, sort: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM records WHERE partition = ?1 AND sort = ?2",
            params![partition, sort],
        )?;
        Ok(())
    }
}
