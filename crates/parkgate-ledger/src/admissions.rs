// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Admission log — append-only SQLite record of every gate decision.
//
// Schema:
//   admissions(
//     id            INTEGER PRIMARY KEY AUTOINCREMENT,
//     plate_number  TEXT    NOT NULL,
//     decision      TEXT    NOT NULL,   -- "True" / "False"
//     reason        TEXT    NOT NULL,   -- reason code, e.g. "divide_by_7"
//     entry_time    TEXT    NOT NULL    -- RFC 3339, whole seconds, local offset
//   )
//
// Plate numbers are not unique: the same vehicle shows up once per visit.

use std::path::Path;

use chrono::SecondsFormat;
use parkgate_core::error::{ParkgateError, Result};
use parkgate_core::{AdmissionRecord, Verdict, decision_str};
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS admissions (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        plate_number  TEXT    NOT NULL,
        decision      TEXT    NOT NULL,
        reason        TEXT    NOT NULL,
        entry_time    TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS admissions_plate ON admissions (plate_number);
";

/// Convert a `rusqlite::Error` into a `ParkgateError::Database`.
fn db_err(e: rusqlite::Error) -> ParkgateError {
    ParkgateError::Database(e.to_string())
}

/// A stored admission, as read back from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionEntry {
    pub id: i64,
    pub plate_number: String,
    pub decision: String,
    pub reason: String,
    pub entry_time: String,
}

impl AdmissionEntry {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            plate_number: row.get(1)?,
            decision: row.get(2)?,
            reason: row.get(3)?,
            entry_time: row.get(4)?,
        })
    }

    pub fn authorized(&self) -> bool {
        self.decision == decision_str(true)
    }
}

/// Append-only admission log backed by a SQLite database.
///
/// There is deliberately no update or delete operation.
pub struct AdmissionLog {
    conn: Connection,
}

impl AdmissionLog {
    /// Open (or create) the admission database at `path`.
    ///
    /// Missing parent directories are created. WAL mode is enabled so the
    /// history command can read while a gate run is writing.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(db_err)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        info!("admission log opened");
        Ok(Self { conn })
    }

    /// Open an in-memory admission database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory admission log opened");
        Ok(Self { conn })
    }

    /// Append a decision for `plate_number`, stamped with the current time.
    pub fn append(&self, plate_number: &str, verdict: &Verdict) -> Result<AdmissionRecord> {
        let record = AdmissionRecord::new(plate_number, verdict);
        self.record(&record)?;
        Ok(record)
    }

    /// Append a pre-built record.
    #[instrument(skip_all, fields(plate = %record.plate_number, decision = %record.decision, reason = %record.reason))]
    pub fn record(&self, record: &AdmissionRecord) -> Result<i64> {
        let entry_time = record
            .entry_time
            .to_rfc3339_opts(SecondsFormat::Secs, false);

        self.conn
            .execute(
                "INSERT INTO admissions (plate_number, decision, reason, entry_time)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.plate_number,
                    record.decision,
                    record.reason.as_str(),
                    entry_time
                ],
            )
            .map_err(db_err)?;

        let id = self.conn.last_insert_rowid();
        debug!(id, "admission recorded");
        Ok(id)
    }

    /// All entries for one plate, oldest first.
    pub fn entries_for_plate(&self, plate_number: &str) -> Result<Vec<AdmissionEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, plate_number, decision, reason, entry_time
                 FROM admissions
                 WHERE plate_number = ?1
                 ORDER BY id ASC",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![plate_number], AdmissionEntry::from_row)
            .map_err(db_err)?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    /// The most recent `limit` entries, newest first.
    pub fn recent_entries(&self, limit: u32) -> Result<Vec<AdmissionEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, plate_number, decision, reason, entry_time
                 FROM admissions
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![limit], AdmissionEntry::from_row)
            .map_err(db_err)?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    /// Total number of logged admissions.
    pub fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM admissions", [], |row| row.get(0))
            .map_err(db_err)
    }
}
