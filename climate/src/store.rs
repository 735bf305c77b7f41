//! SQLite-backed storage for climate records.
//!
//! This module provides [`ClimateStore`], the owner of record persistence
//! and identifier assignment. Records are insert-only; there is no update
//! or delete surface.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{Result, StoreError};
use crate::record::{ClimateDraft, ClimateRecord};

/// SQLite-backed climate record store.
///
/// The connection sits behind a mutex so the store can be shared across
/// request handlers. Each insert is a single-row statement, so a write
/// either fully commits or leaves the table untouched.
pub struct ClimateStore {
    conn: Mutex<Connection>,
}

impl ClimateStore {
    /// Open (or create) a store at the given path.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store.
    ///
    /// Used by tests and by the service when no database path is configured.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS climate_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                recorded_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Insert a validated draft, returning the persisted record.
    ///
    /// SQLite assigns the identifier; when the draft carries no timestamp
    /// the insertion time is stamped in.
    pub fn insert(&self, draft: &ClimateDraft) -> Result<ClimateRecord> {
        let recorded_at = draft.recorded_at.unwrap_or_else(Utc::now);

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO climate_data (temperature, humidity, recorded_at)
             VALUES (?1, ?2, ?3)",
            params![draft.temperature, draft.humidity, recorded_at.to_rfc3339()],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(id, "Inserted climate record");

        Ok(ClimateRecord {
            id,
            temperature: draft.temperature,
            humidity: draft.humidity,
            recorded_at,
        })
    }

    /// Fetch a record by identifier.
    pub fn get(&self, id: i64) -> Result<Option<ClimateRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, temperature, humidity, recorded_at
             FROM climate_data WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_record(row)?)),
            None => Ok(None),
        }
    }

    /// Number of records in the store.
    pub fn count(&self) -> Result<u64> {
        let count: i64 =
            self.conn()?
                .query_row("SELECT COUNT(*) FROM climate_data", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Convert a database row to a [`ClimateRecord`].
    fn row_to_record(row: &rusqlite::Row) -> Result<ClimateRecord> {
        let id: i64 = row.get(0)?;
        let temperature: f64 = row.get(1)?;
        let humidity: f64 = row.get(2)?;
        let recorded_at_str: String = row.get(3)?;

        let recorded_at = DateTime::parse_from_rfc3339(&recorded_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                StoreError::Sqlite(rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                ))
            })?;

        Ok(ClimateRecord {
            id,
            temperature,
            humidity,
            recorded_at,
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
