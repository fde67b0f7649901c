use std::{fs, path::Path};

use rusqlite::{Connection, OptionalExtension, params};

use super::{REPORT_KEY_SUFFIX, ReportStore, report_key};
use crate::errors::ReportError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS reports (
    key   TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL
) WITHOUT ROWID;";

/// Day-keyed report history in a single SQLite file.
pub struct SqliteReportStore {
    conn: Connection,
}

impl SqliteReportStore {
    /// Opens the store at `path`, creating the file and its parent
    /// directory when missing.
    pub fn open(path: &Path) -> Result<Self, ReportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        tracing::debug!("opened report store at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, ReportError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, ReportError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl ReportStore for SqliteReportStore {
    fn save(&self, date: &str, blob: &[u8]) -> Result<(), ReportError> {
        self.conn.execute(
            "INSERT INTO reports (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![report_key(date), blob],
        )?;
        Ok(())
    }

    fn get(&self, date: &str) -> Result<Option<Vec<u8>>, ReportError> {
        let blob = self
            .conn
            .query_row(
                "SELECT value FROM reports WHERE key = ?1",
                params![report_key(date)],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(blob)
    }

    fn dates(&self) -> Result<Vec<String>, ReportError> {
        let mut stmt = self.conn.prepare("SELECT key FROM reports ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_suffix(REPORT_KEY_SUFFIX).map(str::to_string))
            .collect())
    }
}
