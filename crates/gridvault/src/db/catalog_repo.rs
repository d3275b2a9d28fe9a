//! Catalog repository — append and freshness queries over the
//! per-granularity record sets.
//!
//! Each granularity maps to its own table via `Granularity::table_name`,
//! a total function on the enum. No cross-granularity query exists.

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Row};
use serde::Serialize;

use crate::classifier::Granularity;

use super::{Database, DatabaseError};

/// One catalog row: a successfully ingested, recognized artifact.
///
/// Within a record set, `id` is strictly increasing with insertion order,
/// so the most recent entry is the one with the maximum id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub filename: String,
    pub upload_timestamp: String,
}

impl CatalogEntry {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            filename: row.get("filename")?,
            upload_timestamp: row.get("upload_timestamp")?,
        })
    }
}

/// Appends a row to the granularity's record set with a server-assigned id
/// and the current timestamp. Must be called only after the artifact's
/// bytes are durably stored.
///
/// There is no filename-uniqueness constraint: re-ingesting the same
/// filename appends a second row.
pub fn append(
    db: &Database,
    granularity: Granularity,
    filename: &str,
) -> Result<CatalogEntry, DatabaseError> {
    let upload_timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    db.with_conn(move |conn| {
        conn.execute(
            &format!(
                "INSERT INTO {} (filename, upload_timestamp) VALUES (?1, ?2)",
                granularity.table_name()
            ),
            params![filename, upload_timestamp],
        )?;
        let id = conn.last_insert_rowid();
        Ok(CatalogEntry {
            id,
            filename: filename.to_string(),
            upload_timestamp,
        })
    })
}

/// Returns the entry with the maximum id in the granularity's record set,
/// or `None` if the record set is empty.
pub fn latest(
    db: &Database,
    granularity: Granularity,
) -> Result<Option<CatalogEntry>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, filename, upload_timestamp FROM {} ORDER BY id DESC LIMIT 1",
            granularity.table_name()
        ))?;
        let mut rows = stmt.query_map([], CatalogEntry::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Counts entries in the granularity's record set.
pub fn count(db: &Database, granularity: Granularity) -> Result<u64, DatabaseError> {
    db.with_conn(|conn| {
        let count: u64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", granularity.table_name()),
            [],
            |r| r.get(0),
        )?;
        Ok(count)
    })
}

/// Returns up to `limit` entries, newest first.
pub fn recent(
    db: &Database,
    granularity: Granularity,
    limit: u64,
) -> Result<Vec<CatalogEntry>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, filename, upload_timestamp FROM {} ORDER BY id DESC LIMIT ?1",
            granularity.table_name()
        ))?;
        let rows: Vec<CatalogEntry> = stmt
            .query_map(params![limit as i64], CatalogEntry::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
